use std::time::Duration;

use log::{debug, warn};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use mcq_core::model::Term;
use services::{PlayerEvent, QuizPlayer, SubmitOutcome, UtteranceTicket};
use ui::{SessionSummaryVm, TimerVm, map_quiz, map_subject_cards, map_term_cards};

use crate::input::Command;
use crate::render;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Subjects { query: String },
    Terms { subject: String },
    /// A term was picked but had no questions.
    NoQuestions { subject: String },
    Quiz { subject: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Maps typed commands and timer events onto the player and redraws.
pub struct Shell {
    player: QuizPlayer,
    screen: Screen,
}

impl Shell {
    #[must_use]
    pub fn new(player: QuizPlayer) -> Self {
        Self {
            player,
            screen: Screen::Subjects {
                query: String::new(),
            },
        }
    }

    #[must_use]
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    #[must_use]
    pub fn player(&self) -> &QuizPlayer {
        &self.player
    }

    /// Start a quiz directly, as if picked from the menus.
    pub fn open(&mut self, subject: &str, term: Term) {
        let count = self.player.start(subject, term);
        debug!("[Shell] Opened {subject} {term}: {count} questions");
        self.screen = if count == 0 {
            Screen::NoQuestions {
                subject: subject.to_string(),
            }
        } else {
            Screen::Quiz {
                subject: subject.to_string(),
            }
        };
        self.show();
    }

    pub fn show(&self) {
        let theme = self.player.theme();
        let catalog = self.player.catalog();
        match &self.screen {
            Screen::Subjects { query } => {
                render::subjects(&map_subject_cards(catalog, query), query, theme);
            }
            Screen::Terms { subject } => {
                render::terms(subject, &map_term_cards(catalog, subject), theme);
            }
            Screen::NoQuestions { .. } => render::no_questions(theme),
            Screen::Quiz { .. } => {
                if let Some(vm) = map_quiz(&self.player) {
                    render::quiz(&vm, theme);
                }
            }
        }
    }

    pub fn handle_events(&mut self, events: &[PlayerEvent]) {
        for event in events {
            match *event {
                PlayerEvent::Countdown { remaining, .. } => {
                    if render::announces(remaining) {
                        render::countdown(&TimerVm::new(remaining));
                    }
                }
                PlayerEvent::TimedOut { .. } | PlayerEvent::Advanced { .. } => self.show(),
            }
        }
    }

    pub fn narration_finished(&mut self, ticket: UtteranceTicket) {
        self.player.narration_finished(ticket);
    }

    pub async fn handle_line(&mut self, line: &str) -> Flow {
        let command = Command::parse(line);
        match command {
            Command::Quit => {
                self.leave_quiz();
                return Flow::Quit;
            }
            Command::Help => render::help(),
            Command::Redraw => self.show(),
            Command::Theme => {
                let theme = self.player.toggle_theme().await;
                render::note(&format!("Theme: {theme}"), theme);
                self.show();
            }
            command => match self.screen.clone() {
                Screen::Subjects { query } => self.on_subjects(command, &query),
                Screen::Terms { subject } => self.on_terms(command, &subject),
                Screen::NoQuestions { subject } => {
                    self.screen = Screen::Terms { subject };
                    self.show();
                }
                Screen::Quiz { subject } => self.on_quiz(command, subject).await,
            },
        }
        Flow::Continue
    }

    fn on_subjects(&mut self, command: Command, query: &str) {
        let pick = match command {
            Command::Search(query) => {
                self.screen = Screen::Subjects { query };
                self.show();
                return;
            }
            Command::Back => {
                self.screen = Screen::Subjects {
                    query: String::new(),
                };
                self.show();
                return;
            }
            Command::Answer(key) => key.to_string(),
            Command::Pick(pick) => pick,
            _ => {
                render::note("Pick a subject first.", self.player.theme());
                return;
            }
        };

        let subjects: Vec<String> = map_subject_cards(self.player.catalog(), query)
            .into_iter()
            .map(|card| card.name)
            .collect();
        match choose(&subjects, &pick, |name| name.as_str()) {
            Some(subject) => {
                self.screen = Screen::Terms { subject };
                self.show();
            }
            None => render::note(&format!("No subject {pick:?}."), self.player.theme()),
        }
    }

    fn on_terms(&mut self, command: Command, subject: &str) {
        let pick = match command {
            Command::Back => {
                self.screen = Screen::Subjects {
                    query: String::new(),
                };
                self.show();
                return;
            }
            Command::Pick(pick) => pick,
            _ => {
                render::note("Pick a term, or back.", self.player.theme());
                return;
            }
        };

        match choose(&Term::ALL, &pick, |term| term.as_str()) {
            Some(term) => self.open(subject, term),
            None => render::note(&format!("No term {pick:?}."), self.player.theme()),
        }
    }

    async fn on_quiz(&mut self, command: Command, subject: String) {
        let theme = self.player.theme();
        let result = match command {
            Command::Answer(key) => match self.player.answer(key) {
                Ok(SubmitOutcome::AlreadyAnswered) => {
                    render::note("Already answered.", theme);
                    Ok(())
                }
                Ok(SubmitOutcome::NotAnOption) => {
                    render::note(&format!("There is no option {key}."), theme);
                    Ok(())
                }
                Ok(SubmitOutcome::Recorded(_)) => {
                    self.show();
                    Ok(())
                }
                Err(err) => Err(err),
            },
            Command::Next => self.player.next().map(|moved| self.after_move(moved, "last")),
            Command::Previous => self
                .player
                .previous()
                .map(|moved| self.after_move(moved, "first")),
            Command::Bookmark => self.player.toggle_bookmark().await.map(|on| {
                render::note(if on { "Bookmarked." } else { "Bookmark removed." }, theme);
            }),
            Command::ReadAloud => {
                let on = self.player.toggle_read_aloud();
                render::note(if on { "Read aloud: ON" } else { "Read aloud: OFF" }, theme);
                Ok(())
            }
            Command::AutoPlay => {
                let on = self.player.toggle_auto_play();
                render::note(if on { "Auto: ON" } else { "Auto: OFF" }, theme);
                Ok(())
            }
            Command::Back => {
                self.leave_quiz();
                self.screen = Screen::Terms { subject };
                self.show();
                Ok(())
            }
            Command::Search(_) | Command::Pick(_) => {
                render::note("Answer with a, b, c or d.", theme);
                Ok(())
            }
            Command::Help | Command::Quit | Command::Redraw | Command::Theme => Ok(()),
        };

        if let Err(err) = result {
            warn!("[Shell] {err}");
        }
    }

    fn after_move(&self, moved: bool, end: &str) {
        if moved {
            self.show();
        } else {
            render::note(&format!("Already at the {end} question."), self.player.theme());
        }
    }

    fn leave_quiz(&mut self) {
        if let Some(summary) = self.player.leave() {
            render::summary(&SessionSummaryVm::from(&summary), self.player.theme());
        }
    }
}

/// Resolve a 1-based number or a case-insensitive name against `items`.
fn choose<T: Clone>(items: &[T], pick: &str, name: impl Fn(&T) -> &str) -> Option<T> {
    if let Ok(n) = pick.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| items.get(i)).cloned();
    }
    items
        .iter()
        .find(|item| name(item).eq_ignore_ascii_case(pick))
        .cloned()
}

/// Drive the shell until the user quits or stdin closes.
///
/// # Errors
///
/// Returns an I/O error if stdin cannot be read.
pub async fn run(
    mut shell: Shell,
    mut speech_done: UnboundedReceiver<UtteranceTicket>,
) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let second = Duration::from_secs(1);
    let mut ticker = interval_at(Instant::now() + second, second);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let events = shell.player.tick();
                shell.handle_events(&events);
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    shell.leave_quiz();
                    break;
                };
                if shell.handle_line(&line).await == Flow::Quit {
                    break;
                }
            }
            Some(ticket) = speech_done.recv() => shell.narration_finished(ticket),
        }
    }
    Ok(())
}
