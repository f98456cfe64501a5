use console::Style;
use tumorscan_core::candidate::ImageCandidate;
use tumorscan_core::display::{format_byte_limit, ResultSummary};
use tumorscan_core::notify::{Notification, NotificationSink, Severity};

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    good: Style,
    bad: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            good: Style::new().green().bold(),
            bad: Style::new().red().bold(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_candidate(candidate: &ImageCandidate, limit: u64) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("TumorScan"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(9)));
    println!();
    println!("  {:<14}{}", s.label.apply_to("File"), s.path.apply_to(&candidate.name));
    println!("  {:<14}{}", s.label.apply_to("Type"), s.value.apply_to(&candidate.mime));
    println!(
        "  {:<14}{}",
        s.label.apply_to("Size"),
        s.value.apply_to(format!("{} bytes", candidate.size))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Limit"),
        s.value.apply_to(format_byte_limit(limit))
    );
    println!();
}

pub fn print_accepted(name: &str) {
    let s = Styles::new();
    println!("  {} {}", s.good.apply_to("\u{2714}"), s.value.apply_to(format!("{name} is ready for analysis")));
    println!();
}

pub fn print_rejected(message: &str) {
    let s = Styles::new();
    println!("  {} {}", s.bad.apply_to("\u{2718}"), s.value.apply_to(message));
    println!();
}

pub fn print_result(summary: &ResultSummary) {
    let s = Styles::new();
    let verdict = if summary.outcome.is_favorable() {
        &s.good
    } else {
        &s.bad
    };

    println!("  {}", s.title.apply_to("Analysis Result"));
    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Prediction"),
        verdict.apply_to(&summary.prediction)
    );
    println!(
        "  {:<14}{} ({}%)",
        s.label.apply_to("Confidence"),
        s.value.apply_to(summary.label),
        summary.percent
    );
    println!();
}

/// Prints notifications the way the desktop app shows toasts.
pub struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn notify(&self, n: Notification) {
        let s = Styles::new();
        let title = match n.severity {
            Severity::Info => s.title.apply_to(n.title),
            Severity::Destructive => s.bad.apply_to(n.title),
        };
        println!("  {}: {}", title, n.description);
    }
}
