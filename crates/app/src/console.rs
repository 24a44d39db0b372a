//! Line-oriented front-end: renders each `Screen` as text and turns input lines into commands.

use std::io::{self, BufRead, Write};

use quiz_core::model::ReportSummary;
use services::{ChallengeView, FeedbackKind, FeedbackView, GameCommand, GameFlow, Screen};

const CHALLENGE_PROMPT: &str = "answer number or text, [s] skip, [h] home > ";

pub struct Console<R, W> {
    input: R,
    output: W,
    default_questions: usize,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, default_questions: usize) -> Self {
        Self {
            input,
            output,
            default_questions,
        }
    }

    /// Play until the user quits or input ends.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from reading input or writing output.
    pub fn run(&mut self, game: &mut GameFlow) -> io::Result<()> {
        let mut screen = game.screen();
        loop {
            self.render(&screen, game.pool_size())?;
            let Some(command) = self.read_command(&screen, game)? else {
                return Ok(());
            };
            match game.dispatch(command) {
                Ok(next) => screen = next,
                Err(e) => {
                    writeln!(self.output, "! {e}")?;
                    screen = game.screen();
                }
            }
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
    }

    fn read_command(
        &mut self,
        screen: &Screen,
        game: &GameFlow,
    ) -> io::Result<Option<GameCommand>> {
        let Some(line) = self.read_line()? else {
            return Ok(None);
        };
        let choice = line.trim();

        let command = match screen {
            Screen::Home => {
                if choice.eq_ignore_ascii_case("q") {
                    return Ok(None);
                }
                write!(self.output, "Enter your name: ")?;
                let Some(player_name) = self.read_line()? else {
                    return Ok(None);
                };
                write!(
                    self.output,
                    "Number of questions ({}-{}) [{}]: ",
                    game.settings().min_questions(),
                    game.settings().max_questions(),
                    self.default_questions
                )?;
                let Some(count) = self.read_line()? else {
                    return Ok(None);
                };
                let requested = count.trim().parse().unwrap_or(self.default_questions);
                GameCommand::Start {
                    player_name,
                    requested_count: game.settings().clamp_questions(requested),
                }
            }
            Screen::Challenge(view) => {
                // A blank line is not an answer.
                let mut choice = choice.to_owned();
                while choice.is_empty() {
                    write!(self.output, "{CHALLENGE_PROMPT}")?;
                    let Some(line) = self.read_line()? else {
                        return Ok(None);
                    };
                    choice = line.trim().to_owned();
                }
                match choice.as_str() {
                    "s" | "S" => GameCommand::Skip,
                    "h" | "H" => GameCommand::Home,
                    _ => GameCommand::Submit {
                        answer: pick_option(view, &choice),
                    },
                }
            }
            Screen::Feedback(_) => match choice {
                "h" | "H" => GameCommand::Home,
                _ => GameCommand::Next,
            },
            Screen::Report(_) => GameCommand::Home,
        };
        Ok(Some(command))
    }

    fn render(&mut self, screen: &Screen, pool_size: usize) -> io::Result<()> {
        writeln!(self.output)?;
        match screen {
            Screen::Home => self.render_home(pool_size),
            Screen::Challenge(view) => self.render_challenge(view),
            Screen::Feedback(view) => self.render_feedback(view),
            Screen::Report(report) => self.render_report(report),
        }
    }

    fn render_home(&mut self, pool_size: usize) -> io::Result<()> {
        writeln!(self.output, "Gamified CyberSecurity Awareness Quiz Game")?;
        writeln!(self.output, "Level up your cyber knowledge and stay secure!")?;
        writeln!(self.output, "{pool_size} questions in the bank")?;
        write!(self.output, "[enter] start game  [q] quit > ")
    }

    fn render_challenge(&mut self, view: &ChallengeView) -> io::Result<()> {
        writeln!(self.output, "Score: {}", view.score)?;
        writeln!(self.output, "Challenge {}/{}", view.number, view.total)?;
        if let Some(content) = &view.content {
            writeln!(self.output, "  {content}")?;
        }
        writeln!(self.output, "{}", view.question)?;
        for (i, option) in view.options.iter().enumerate() {
            writeln!(self.output, "  {}) {option}", i + 1)?;
        }
        write!(self.output, "{CHALLENGE_PROMPT}")
    }

    fn render_feedback(&mut self, view: &FeedbackView) -> io::Result<()> {
        writeln!(self.output, "{}", view.kind.title())?;
        match view.kind {
            FeedbackKind::Correct => {
                writeln!(self.output, "Your answer: {}", view.submitted)?;
            }
            FeedbackKind::Retry => {
                writeln!(self.output, "Your answer: {}", view.submitted)?;
                writeln!(
                    self.output,
                    "Attempts: {}/{}",
                    view.attempts, view.max_attempts
                )?;
            }
            FeedbackKind::Failed => {
                writeln!(self.output, "Too many wrong attempts. Challenge failed.")?;
            }
        }
        writeln!(self.output, "Score: {}", view.score)?;
        if let Some(explanation) = &view.explanation {
            writeln!(self.output, "Explanation: {explanation}")?;
        }
        let next = if view.kind == FeedbackKind::Retry {
            "try again"
        } else {
            "next challenge"
        };
        write!(self.output, "[enter] {next}  [h] home > ")
    }

    fn render_report(&mut self, report: &ReportSummary) -> io::Result<()> {
        writeln!(self.output, "Report for {}", report.player_name())?;
        writeln!(
            self.output,
            "Total Questions Attempted: {}",
            report.total_questions()
        )?;
        writeln!(self.output, "Correct Answers: {}", report.correct_answers())?;
        writeln!(self.output, "Wrong Answers: {}", report.wrong_answers())?;
        writeln!(
            self.output,
            "Level of Understanding: {} ({:.1}%)",
            report.tier(),
            report.percentage()
        )?;
        write!(self.output, "[enter] return to home > ")
    }
}

/// A 1-based option number selects that option; anything else is submitted verbatim.
fn pick_option(view: &ChallengeView, choice: &str) -> String {
    choice
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| view.options.get(i))
        .cloned()
        .unwrap_or_else(|| choice.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{QuestionRecord, QuizSettings};

    fn play(script: &str) -> String {
        let mut game = GameFlow::new(
            vec![QuestionRecord::builtin_fallback()],
            QuizSettings::default(),
        );
        let mut out = Vec::new();
        Console::new(script.as_bytes(), &mut out, 25)
            .run(&mut game)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn option_number_submits_that_option() {
        let out = play("\nAda\n1\n1\n\n\nq\n");
        assert!(out.contains("Correct!"));
        assert!(out.contains("Report for Ada"));
        assert!(out.contains("Expert (100.0%)"));
    }

    #[test]
    fn wrong_answer_offers_a_retry() {
        let out = play("\n\n\n2\n\nyes\n");
        assert!(out.contains("Not Quite"));
        assert!(out.contains("Attempts: 1/3"));
        assert!(out.contains("Correct!"));
    }

    #[test]
    fn input_end_stops_the_loop() {
        let out = play("");
        assert!(out.contains("Gamified CyberSecurity Awareness Quiz Game"));
        assert!(out.contains("1 questions in the bank"));
    }

    #[test]
    fn blank_line_during_challenge_reprompts_without_using_an_attempt() {
        let out = play("\n\n\n\n  \n1\n");
        assert!(!out.contains("Not Quite"));
        assert!(out.contains("Correct!"));
        assert_eq!(out.matches(CHALLENGE_PROMPT).count(), 3);
    }
}
