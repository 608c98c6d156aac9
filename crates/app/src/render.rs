//! Line-oriented terminal output.

use colored::{Color, ColoredString, Colorize};

use mcq_core::model::Theme;
use ui::{
    OptionState, OptionVm, QuizVm, SessionSummaryVm, SubjectCardVm, TermCardVm, TimerUrgency,
    TimerVm,
};

pub const NO_QUESTIONS: &str = "No questions found for this selection.";

#[derive(Debug, Clone, Copy)]
struct Palette {
    accent: Color,
    muted: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        if theme.is_dark() {
            Self {
                accent: Color::BrightCyan,
                muted: Color::White,
            }
        } else {
            Self {
                accent: Color::Blue,
                muted: Color::BrightBlack,
            }
        }
    }
}

fn rule(palette: Palette) -> ColoredString {
    "─".repeat(60).color(palette.muted)
}

pub fn subjects(cards: &[SubjectCardVm], query: &str, theme: Theme) {
    let palette = Palette::for_theme(theme);
    println!("{}", rule(palette));
    println!("{}", "Select Your Subject".color(palette.accent).bold());
    if !query.is_empty() {
        println!("{}", format!("filter: {query}").color(palette.muted));
    }

    if cards.is_empty() {
        println!("No subjects found matching \"{query}\"");
    }
    for (i, card) in cards.iter().enumerate() {
        println!(
            "{:>3}. {} {}  {}",
            i + 1,
            format!("[{}]", card.avatar).color(palette.accent).bold(),
            card.name.bold(),
            card.caption.color(palette.muted)
        );
    }
    println!(
        "{}",
        "Pick a number or name, /text to search, t theme, q quit".color(palette.muted)
    );
}

pub fn terms(subject: &str, cards: &[TermCardVm], theme: Theme) {
    let palette = Palette::for_theme(theme);
    println!("{}", rule(palette));
    println!("{}", subject.color(palette.accent).bold());
    for (i, card) in cards.iter().enumerate() {
        println!(
            "{:>3}. {}  {}",
            i + 1,
            card.label.bold(),
            format!("({} questions)", card.question_count).color(palette.muted)
        );
    }
    println!("{}", "Pick a term, or back for subjects".color(palette.muted));
}

pub fn no_questions(theme: Theme) {
    let palette = Palette::for_theme(theme);
    println!("{}", NO_QUESTIONS.yellow());
    println!("{}", "Type back to choose another term.".color(palette.muted));
}

fn timer_colored(timer: &TimerVm) -> ColoredString {
    let label = format!("⏱ {}", timer.label);
    match timer.urgency {
        TimerUrgency::Calm => label.normal(),
        TimerUrgency::Warning => label.yellow(),
        TimerUrgency::Critical => label.red().bold(),
    }
}

fn option_line(option: &OptionVm) -> String {
    let text = format!("{}) {}", option.key, option.text);
    match option.state {
        OptionState::Neutral => format!("   {text}"),
        OptionState::Correct => format!(" {} {}", "✓".green(), text.green().bold()),
        OptionState::Wrong => format!(" {} {}", "✗".red(), text.red()),
        OptionState::Dimmed => format!("   {}", text.dimmed()),
    }
}

pub fn quiz(vm: &QuizVm, theme: Theme) {
    let palette = Palette::for_theme(theme);
    println!("{}", rule(palette));
    println!(
        "{} {}  {}  {} {}  {}  {}{}",
        format!("{} {}", vm.subject, vm.term).color(palette.muted),
        vm.position_label.color(palette.accent).bold(),
        format!("({}%)", vm.progress_percent).color(palette.muted),
        format!("✓ {}", vm.correct).green(),
        format!("✗ {}", vm.wrong).red(),
        timer_colored(&vm.timer),
        vm.auto_play_label.color(palette.muted),
        if vm.bookmarked { "  ★".yellow() } else { "".normal() },
    );
    println!();
    println!("{}", vm.question_text.bold());
    if vm.options.is_empty() {
        println!("{}", "   (no options could be read for this question)".dimmed());
    }
    for option in &vm.options {
        println!("{}", option_line(option));
    }

    if let Some(feedback) = &vm.feedback {
        println!();
        let title = if feedback.timed_out {
            feedback.title.red().bold()
        } else {
            feedback.title.color(palette.accent).bold()
        };
        println!("{title}");
        println!("{}", feedback.explanation);
    }

    let mut hints = Vec::new();
    if vm.feedback.is_none() {
        hints.push("a-d answer");
    }
    if vm.can_prev {
        hints.push("p prev");
    }
    if vm.can_next {
        hints.push("n next");
    }
    hints.extend(["* bookmark", "r read", "auto", "back"]);
    println!("{}", hints.join(" · ").color(palette.muted));
}

/// Countdown values worth a line of their own.
#[must_use]
pub fn announces(remaining: u32) -> bool {
    matches!(remaining, 20 | 10 | 5 | 3 | 2 | 1)
}

pub fn countdown(timer: &TimerVm) {
    println!("{}", timer_colored(timer));
}

pub fn summary(vm: &SessionSummaryVm, theme: Theme) {
    let palette = Palette::for_theme(theme);
    println!("{}", rule(palette));
    println!("{}", format!("{} finished", vm.title).color(palette.accent).bold());
    println!(
        "{}  {}  {}  unanswered {}",
        format!("✓ {}", vm.correct).green(),
        format!("✗ {}", vm.wrong).red(),
        format!("timed out {}", vm.timed_out).yellow(),
        vm.unanswered
    );
    println!(
        "{}",
        format!(
            "accuracy {} · {} questions · started {} · took {}",
            vm.accuracy_label, vm.total, vm.started_at_str, vm.elapsed_str
        )
        .color(palette.muted)
    );
}

pub fn note(message: &str, theme: Theme) {
    let palette = Palette::for_theme(theme);
    println!("{}", message.color(palette.muted).italic());
}

pub fn help() {
    println!("{}", "Commands".bold());
    for (keys, what) in [
        ("a b c d", "answer the current question"),
        ("n / p", "next / previous question"),
        ("* or mark", "bookmark the current question"),
        ("r or read", "toggle reading aloud"),
        ("auto", "toggle auto-play"),
        ("t or theme", "toggle dark / light theme"),
        ("/text", "search subjects"),
        ("back", "leave the current screen"),
        ("q", "quit"),
    ] {
        println!("  {:<12} {what}", keys.cyan());
    }
}
