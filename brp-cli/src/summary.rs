//! Terminal output shown after a run
use std::path::Path;

use brp_core::runner::BotReport;
use owo_colors::OwoColorize;

pub fn print_new_bot(name: &str, config_file: &Path) {
    println!(
        "{} {} {} {}",
        "Added bot".bold().green(),
        name.bold().blue(),
        "to".bold(),
        config_file.display().bold().purple().underline()
    );
    println!(
        "{}",
        "Fill in its tags and service settings before the next run.".bold()
    );
}

pub fn print_summary(reports: &[BotReport]) {
    if reports.is_empty() {
        println!("{}", "No bots were run".bold().yellow());
        return;
    }

    for report in reports {
        match &report.result {
            Ok(outcome) if outcome.note_created => println!(
                "{:<16} {} {}",
                format!("[{}]", report.name),
                "posted".bold().green(),
                outcome.source_url.underline()
            ),
            Ok(outcome) => println!(
                "{:<16} {} {}",
                format!("[{}]", report.name),
                "uploaded, note failed".bold().yellow(),
                outcome.source_url.underline()
            ),
            Err(e) => println!(
                "{:<16} {} {}",
                format!("[{}]", report.name),
                "failed:".bold().red(),
                e
            ),
        }
    }

    let ok = reports.iter().filter(|r| r.is_success()).count();
    println!(
        "{} {} {}",
        ok.to_string().bold().blue(),
        "of".bold(),
        format!("{} bots published", reports.len()).bold()
    );
}
