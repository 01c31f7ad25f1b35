//! Interactive session: one command per line on stdin, the puppy's reactions
//! on stdout (text, or one JSON event per line with `--json`).

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::path::Path;

use chrono::{DateTime, Local};
use puppy_core::{
    Activity, PetOutcome, Puppy, PuppyConfig, SleepRecovery, TransitionKind, DAILY_RESETS,
};
use serde_json::json;
use tracing::debug;

/// (usage, description) pairs for `help`.
const HELP: [(&str, &str); 8] = [
    ("study | guitar | game | sleep | idle", "switch activity"),
    ("pet", "pet the puppy"),
    ("status", "show mood and energy"),
    ("say <text>", "show text in the bubble"),
    ("clear", "hide the bubble"),
    ("reset", "refill mood and energy (once a day)"),
    ("help", "this list"),
    ("quit", "leave"),
];

pub fn run(
    config_path: Option<&Path>,
    seed: Option<u64>,
    json: bool,
) -> puppy_core::Result<()> {
    let mut config = match config_path {
        Some(path) => PuppyConfig::load_from(path)?,
        None => PuppyConfig::load_or_default(),
    };
    if seed.is_some() {
        config.petting.seed = seed;
    }

    let puppy = Puppy::with_config(Local::now(), &config)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(
        puppy,
        stdin.lock(),
        stdout.lock(),
        json,
        config.bubble.max_chars,
    );
    session.run_with_clock(Local::now)?;
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Request(Activity),
    Pet,
    Status,
    Say(String),
    Clear,
    Reset,
    Help,
    Quit,
    Nothing,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let command = match word.to_ascii_lowercase().as_str() {
        "" => Command::Nothing,
        "pet" => Command::Pet,
        "status" => Command::Status,
        "say" => Command::Say(rest.to_string()),
        "clear" => Command::Clear,
        "reset" => Command::Reset,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => other
            .parse::<Activity>()
            .map(Command::Request)
            .map_err(|_| format!("unknown command '{word}', type 'help'"))?,
    };
    Ok(command)
}

/// Keep the first `max_chars` characters.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

pub struct Session<R, W> {
    puppy: Puppy,
    input: R,
    output: W,
    json: bool,
    bubble_max_chars: usize,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(puppy: Puppy, input: R, output: W, json: bool, bubble_max_chars: usize) -> Self {
        Self {
            puppy,
            input,
            output,
            json,
            bubble_max_chars,
        }
    }

    /// Process commands until `quit` or end of input, reading the time from
    /// `clock` once per command and again after a reset is confirmed.
    pub fn run_with_clock<C>(&mut self, mut clock: C) -> io::Result<()>
    where
        C: FnMut() -> DateTime<Local>,
    {
        self.greet()?;
        loop {
            if !self.json {
                write!(self.output, "> ")?;
                self.output.flush()?;
            }
            let Some(line) = self.read_line()? else {
                break;
            };
            let keep_going = match parse_command(&line) {
                Ok(command) => self.execute(command, &mut clock)?,
                Err(message) => {
                    if self.json {
                        let value = json!({ "type": "UnknownCommand", "input": line.trim() });
                        writeln!(self.output, "{value}")?;
                    } else {
                        writeln!(self.output, "{message}")?;
                    }
                    true
                }
            };
            self.flush_events()?;
            if !keep_going {
                break;
            }
        }
        self.output.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    /// Text for humans; dropped in JSON mode, where events carry the news.
    fn say(&mut self, text: impl Display) -> io::Result<()> {
        if self.json {
            return Ok(());
        }
        writeln!(self.output, "{text}")
    }

    fn greet(&mut self) -> io::Result<()> {
        if self.json {
            return self.write_status();
        }
        let snapshot = self.puppy.snapshot();
        self.say(format_args!(
            "Your puppy is up: {} ({}). Type 'help' for commands.",
            snapshot.activity.label(),
            snapshot.animation()
        ))
    }

    /// Returns false when the session should end.
    fn execute<C>(&mut self, command: Command, clock: &mut C) -> io::Result<bool>
    where
        C: FnMut() -> DateTime<Local>,
    {
        if let Command::Reset = command {
            self.reset(clock)?;
            return Ok(true);
        }
        let now = clock();
        match command {
            Command::Nothing => {}
            Command::Request(target) => self.request(target, now)?,
            Command::Pet => self.pet(now)?,
            Command::Status => self.write_status()?,
            Command::Say(text) => {
                let text = truncate_chars(&text, self.bubble_max_chars);
                if self.puppy.say(&text, now) {
                    self.say(format_args!("bubble: {text}"))?;
                } else {
                    self.say("nothing to say")?;
                }
            }
            Command::Clear => {
                self.puppy.clear_message(now);
                self.say("bubble cleared")?;
            }
            // Handled above.
            Command::Reset => {}
            Command::Help => self.write_help()?,
            Command::Quit => {
                self.say("Bye!")?;
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn request(&mut self, target: Activity, now: DateTime<Local>) -> io::Result<()> {
        let transition = match self.puppy.request_activity(target, now) {
            Ok(transition) => transition,
            Err(err) => return self.say(err.warning()),
        };
        if transition.kind == TransitionKind::AlreadyActive {
            return self.say(&transition.message);
        }

        match transition.recovery {
            Some(SleepRecovery::Full) => self.say("Slept well, energy refilled.")?,
            Some(SleepRecovery::Partial) => self.say("Short nap, a little energy back.")?,
            None => {}
        }
        if transition.kind == TransitionKind::Overridden {
            self.say(format_args!(
                "Too tired for {}, switching to {}.",
                transition.requested.label(),
                transition.activity.label()
            ))?;
        } else {
            self.say(format_args!("Now: {}", transition.activity.label()))?;
        }
        self.say(&transition.message)
    }

    fn pet(&mut self, now: DateTime<Local>) -> io::Result<()> {
        match self.puppy.register_pet(now) {
            PetOutcome::CooldownActive { .. } => self.say("The fur is getting bald!"),
            PetOutcome::Accumulating { touch_count, .. } => {
                self.say(format_args!("pat x{touch_count}"))
            }
            PetOutcome::Rewarded { .. } => {
                let tier = self.puppy.mood_tier();
                self.say(format_args!("\u{2665} {}", tier.message()))
            }
        }
    }

    /// The date and plan are taken from the clock after the answer, which
    /// may come in on the next day.
    fn reset<C>(&mut self, clock: &mut C) -> io::Result<()>
    where
        C: FnMut() -> DateTime<Local>,
    {
        let quota = self.puppy.reset_quota(clock());
        self.say(format_args!("Today's reset chance: {quota}/{DAILY_RESETS}"))?;
        self.say("Reset mood and energy? [y/n]")?;
        if !self.json {
            self.output.flush()?;
        }

        let answer = self.read_line()?.unwrap_or_default();
        if !matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
            return self.say("Reset cancelled.");
        }
        match self.puppy.request_reset(clock()) {
            Ok(outcome) => {
                self.say(&outcome.message)?;
                self.say(format_args!("Now: {}", outcome.activity.label()))
            }
            Err(err) => self.say(err),
        }
    }

    fn write_help(&mut self) -> io::Result<()> {
        if self.json {
            let commands: Vec<_> = HELP
                .iter()
                .map(|(usage, description)| json!({ "usage": usage, "description": description }))
                .collect();
            let value = json!({ "type": "Help", "commands": commands });
            return writeln!(self.output, "{value}");
        }
        writeln!(self.output, "commands:")?;
        for (usage, description) in HELP {
            writeln!(self.output, "  {usage:<38} {description}")?;
        }
        Ok(())
    }

    fn write_status(&mut self) -> io::Result<()> {
        let snapshot = self.puppy.snapshot();
        if self.json {
            let value = json!({
                "type": "Status",
                "activity": snapshot.activity,
                "mood": snapshot.mood,
                "energy": snapshot.energy,
                "tier": snapshot.tier,
                "animation": snapshot.animation().to_string(),
                "message": self.puppy.message(),
            });
            return writeln!(self.output, "{value}");
        }
        writeln!(self.output, "{}", snapshot.status_text())?;
        writeln!(self.output, "Activity: {}", snapshot.activity.label())?;
        writeln!(self.output, "Animation: {}", snapshot.animation())?;
        if let Some(text) = self.puppy.message() {
            writeln!(self.output, "Bubble: {text}")?;
        }
        Ok(())
    }

    /// Print queued events in JSON mode; in text mode log them and show the
    /// new animation once if any of them changed what the puppy looks like.
    fn flush_events(&mut self) -> io::Result<()> {
        let mut redraw = false;
        for event in self.puppy.drain_events() {
            redraw |= event.needs_redraw();
            if self.json {
                writeln!(self.output, "{}", serde_json::to_string(&event)?)?;
            } else {
                debug!(?event, "event");
            }
        }
        if redraw {
            let animation = self.puppy.snapshot().animation();
            self.say(format_args!("animation: {animation}"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Cursor;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2026, 6, 15, h, m, s)
            .single()
            .expect("unambiguous local time")
    }

    fn session_output(input: &str, json: bool, now: DateTime<Local>) -> String {
        let mut out = Vec::new();
        {
            let puppy = Puppy::new(now);
            let mut session =
                Session::new(puppy, Cursor::new(input.to_string()), &mut out, json, 10);
            session.run_with_clock(|| now).unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_command("  Study \n"), Ok(Command::Request(Activity::Study)));
        assert_eq!(parse_command("say  hello there "), Ok(Command::Say("hello there".into())));
        assert_eq!(parse_command("say"), Ok(Command::Say(String::new())));
        assert_eq!(parse_command(""), Ok(Command::Nothing));
        assert_eq!(parse_command("EXIT"), Ok(Command::Quit));
        assert!(parse_command("dance").unwrap_err().contains("unknown command 'dance'"));
    }

    #[test]
    fn truncates_by_characters() {
        assert_eq!(truncate_chars("abcdefghijklmnop", 10), "abcdefghij");
        assert_eq!(truncate_chars("ﻌﻌﻌ", 2), "ﻌﻌ");
        assert_eq!(truncate_chars("hi", 10), "hi");
    }

    #[test]
    fn already_active_prints_tip() {
        let out = session_output("study\nquit\n", false, at(13, 0, 0));
        assert!(out.contains("You are studying now!"));
        assert!(out.contains("Bye!"));
    }

    #[test]
    fn gated_request_prints_warning() {
        let out = session_output(
            "idle\nstudy\nidle\nstudy\nidle\nstudy\n",
            false,
            at(13, 0, 0),
        );
        assert!(out.contains("Don't have enough mood"));
    }

    #[test]
    fn reset_asks_first() {
        let out = session_output("reset\nn\nreset\ny\nreset\ny\n", false, at(13, 0, 0));
        assert!(out.contains("Today's reset chance: 1/1"));
        assert!(out.contains("Reset cancelled."));
        assert!(out.contains("Reset successfully!"));
        assert!(out.contains("Today's reset chance: 0/1"));
        assert!(out.contains("No chance to reset... Just enjoy your day!"));
    }

    #[test]
    fn bubble_text_is_truncated() {
        let out = session_output("say hello puppy world\nstatus\n", false, at(13, 0, 0));
        assert!(out.contains("bubble: hello pupp"));
        assert!(out.contains("Bubble: hello pupp\n"));
    }

    #[test]
    fn json_mode_prints_events_only() {
        let out = session_output("game\nfly\nhelp\n", true, at(13, 0, 0));
        let values: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(values[0]["type"], "Status");
        assert_eq!(values[0]["activity"], "study");
        assert_eq!(values[1]["type"], "ActivityChanged");
        assert_eq!(values[1]["to"], "game");
        assert_eq!(values[1]["mood"], 5);
        assert_eq!(values[2]["type"], "UnknownCommand");
        assert_eq!(values[3]["type"], "Help");
        assert_eq!(values[3]["commands"][1]["usage"], "pet");
        assert_eq!(values.len(), 4);
    }

    #[test]
    fn help_lists_commands_as_text() {
        let out = session_output("help\n", false, at(13, 0, 0));
        assert!(out.contains("commands:\n"));
        assert!(out.contains("  say <text>"));
        assert!(out.contains("hide the bubble"));
    }

    #[test]
    fn animation_is_shown_after_visible_changes_only() {
        let out = session_output("study\ngame\nreset\ny\n", false, at(13, 0, 0));
        assert_eq!(out.matches("animation: game_happy").count(), 1);
        assert_eq!(out.matches("animation: study_happy").count(), 1);
        assert_eq!(out.matches("animation:").count(), 2);
    }

    #[test]
    fn reset_confirmed_after_midnight_uses_the_new_day() {
        let times = [
            // First reset: asked and confirmed on the same day.
            at(13, 0, 0),
            at(13, 0, 5),
            // Second reset: asked before midnight, confirmed after.
            at(23, 59, 50),
            at(0, 0, 10) + chrono::Duration::days(1),
        ];
        let mut clock = times.into_iter();
        let mut out = Vec::new();
        {
            let puppy = Puppy::new(at(13, 0, 0));
            let input = Cursor::new("reset\ny\nreset\ny\n".to_string());
            let mut session = Session::new(puppy, input, &mut out, false, 10);
            session
                .run_with_clock(|| clock.next().expect("clock read too often"))
                .unwrap();
        }
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Today's reset chance: 0/1"));
        assert_eq!(out.matches("Reset successfully!").count(), 2);
        assert!(out.contains("Now: Sleep"));
        assert!(!out.contains("No chance to reset"));
    }
}
