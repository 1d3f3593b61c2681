use {
    chrono::Local,
    clap::Parser,
    discord_timestamps::{from_input_with_reference, render_formats},
    std::process::ExitCode,
};

/// Generate Discord timestamps from human-readable dates
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Human readable date time: 'YYYY-MM-DD HH:MM', 'MM/DD/YYYY', or just
    /// 'HH:MM' for today's date with that time. If no args, defaults to
    /// current time.
    date: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Captured once; feeds both the parser's "today" and the relative preview.
    let now = Local::now();

    let timestamp = match from_input_with_reference(cli.date.as_deref(), now) {
        Ok(timestamp) => timestamp,
        Err(error) => {
            println!("Error: {error}");
            return ExitCode::FAILURE;
        }
    };

    println!("\nDiscord Timestamps (copy and paste these into Discord):");
    println!("{}", "-".repeat(60));
    println!(
        "For time: {} (local)\n",
        timestamp.format("%Y-%m-%d %H:%M:%S")
    );

    for entry in render_formats(timestamp, now) {
        println!("{:<16} → {:<16} → {}", entry.label, entry.markup, entry.preview);
    }

    ExitCode::SUCCESS
}
