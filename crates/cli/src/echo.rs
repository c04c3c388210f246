use owo_colors::OwoColorize;
use siterate_core::SiteReport;

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!(
        "\n{} {} {}",
        "Siterate".bold().bright_blue(),
        "v".dimmed(),
        VERSION.dimmed()
    );
    eprintln!("{}", "Rate the design, SEO and content of web pages\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

/// Print timing information with color coding
pub fn print_timing(label: &str, duration: std::time::Duration) {
    let ms = duration.as_secs_f64() * 1000.0;
    let label = format!("{}:", label);

    if ms < 500.0 {
        eprintln!("  {} {:>8.2}ms ({})", label.dimmed(), ms, "fast".dimmed());
    } else if ms < 2000.0 {
        eprintln!("  {} {:>8.2}ms ({})", label.dimmed(), ms, "moderate".bright_yellow());
    } else {
        eprintln!("  {} {:>8.2}ms ({})", label.dimmed(), ms, "slow".bright_red());
    }
}

/// Print a colored scoreboard for the finished report
pub fn print_summary(report: &SiteReport) {
    eprintln!("\n{}", "═".repeat(60).dimmed());
    eprintln!("{}", "Scores".bold().cyan());
    eprintln!("{}", "═".repeat(60).dimmed());

    for (label, rating) in [
        ("Design", report.design_rating),
        ("SEO", report.seo_rating),
        ("Content", report.content_rating),
        ("Overall", report.overall_rating),
    ] {
        let value = format!("{:>4.1}/10", rating);
        let painted = if rating >= 8.0 {
            value.bright_green().to_string()
        } else if rating >= 6.0 {
            value.bright_yellow().to_string()
        } else {
            value.bright_red().to_string()
        };
        eprintln!("  {} {}", format!("{:<9}", format!("{}:", label)).dimmed(), painted);
    }

    if let Some(ai) = &report.ai {
        eprintln!(
            "  {} {}",
            format!("{:<9}", "AI:").dimmed(),
            format!("{:>4.0}/100", ai.overall_score).bright_white()
        );
    }

    for category in &report.degraded {
        print_warning(&format!("{} could not be scored and fell back to neutral", category));
    }
    if report.ai.as_ref().is_some_and(|ai| !ai.degraded.is_empty()) {
        print_warning("AI judgment unavailable, neutral scores reported");
    }
    eprintln!();
}

/// Format file size for display
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
