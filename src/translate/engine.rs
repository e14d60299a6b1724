//! Translation Engine
//!
//! Maps split instruction lines onto a dialect, threading
//! [`TranslationState`] from one line to the next.

use crate::dialect::{CoordinateMode, Dialect};
use crate::parser::{self, Axis, InstructionLine, ParsedLine};
use crate::translate::document::OutputDocument;
use crate::translate::error::{TranslateError, TranslateResult};
use crate::translate::state::TranslationState;

/// Line-by-line translator for one program
///
/// Holds the state of a single translation; build a new one per program.
#[derive(Debug)]
pub struct Translator<'d> {
    dialect: &'d Dialect,
    state: TranslationState,
}

impl<'d> Translator<'d> {
    pub fn new(dialect: &'d Dialect) -> Self {
        Self {
            dialect,
            state: TranslationState::new(&dialect.initial_state),
        }
    }

    pub fn state(&self) -> &TranslationState {
        &self.state
    }

    /// Split and translate one raw input line
    ///
    /// Blank and comment lines produce nothing and leave the state alone.
    pub fn translate_line(
        &mut self,
        line_num: usize,
        raw: &str,
        out: &mut OutputDocument,
    ) -> TranslateResult<()> {
        let parsed = parser::parse_line(raw).map_err(|reason| TranslateError::MalformedLine {
            line: line_num,
            text: raw.trim().to_string(),
            reason,
        })?;

        match parsed {
            ParsedLine::Instruction(instruction) => {
                self.translate_instruction(line_num, &instruction, out)
            }
            ParsedLine::Comment(_) | ParsedLine::Empty => Ok(()),
        }
    }

    /// Translate one instruction line
    ///
    /// On error nothing is appended to `out` and the state is unchanged.
    pub fn translate_instruction(
        &mut self,
        line_num: usize,
        line: &InstructionLine,
        out: &mut OutputDocument,
    ) -> TranslateResult<()> {
        let rule = self
            .dialect
            .rule(&line.command)
            .ok_or_else(|| TranslateError::UnsupportedCommand {
                line: line_num,
                command: line.command.clone(),
            })?;

        let feed_rate = line
            .feed_rate
            .clone()
            .unwrap_or_else(|| self.state.last_feed_rate.clone());

        let relative = self.state.mode == CoordinateMode::Relative;
        let mut command_line = rule.output.clone();
        for &axis in &rule.axes {
            let word = match line.word(axis) {
                Some(word) => word.token(),
                // Zero distance keeps a relative axis where it is
                None if relative && axis.carries_forward() => format!("{}0", axis),
                None => self
                    .state
                    .position(axis)
                    .map(str::to_string)
                    .ok_or_else(|| TranslateError::MissingAxis {
                        line: line_num,
                        command: line.command.clone(),
                        axis,
                    })?,
            };
            command_line.push(' ');
            command_line.push_str(&word);
        }

        for word in line.words.iter().filter(|w| !rule.requires(w.axis)) {
            log::debug!(
                "line {}: {} takes no {} argument, dropping '{}'",
                line_num,
                rule.output,
                word.axis,
                word.token()
            );
        }

        if self.dialect.line_comments {
            out.push(format!(
                "(Command: {}, Feed Rate: {}, args: {})",
                line.command, feed_rate, line.args
            ));
        }

        // The controller keeps the previous feed rate when none is given
        if feed_rate != self.state.last_feed_rate {
            out.push(feed_rate.clone());
        }

        log::debug!("line {}: {} -> {}", line_num, line.command, command_line);
        out.push(command_line);

        // A canned cycle leaves the tool at its retract plane, not at Z
        let retract = rule.retract_axis.and_then(|axis| line.word(axis));
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let word = match axis {
                Axis::Z => retract.or_else(|| line.word(axis)),
                _ => line.word(axis),
            };
            let Some(word) = word else {
                continue;
            };
            if relative {
                self.state.offset_position(axis, &word.value);
            } else {
                self.state.set_position(axis, format!("{}{}", axis, word.value));
            }
        }
        if let Some(mode) = rule.mode {
            self.state.mode = mode;
        }
        self.state.last_command = line.command.clone();
        self.state.last_feed_rate = feed_rate;

        Ok(())
    }
}

/// Translate a complete generic G-code program into a dialect
///
/// The result starts with the dialect header and ends with its footer. Any
/// error aborts the whole translation.
pub fn translate_document(input: &str, dialect: &Dialect) -> TranslateResult<String> {
    log::info!("Post-processing for dialect '{}'", dialect.name);

    let mut out = OutputDocument::new();
    out.extend(dialect.header.iter().cloned());

    let mut translator = Translator::new(dialect);
    let mut translated = 0;
    for (line_num, line) in input.lines().enumerate() {
        let before = out.len();
        translator.translate_line(line_num + 1, line, &mut out)?;
        if out.len() > before {
            translated += 1;
        }
    }

    if translator.state().mode == CoordinateMode::Relative {
        log::warn!("Program ends in relative mode; the footer may not move where expected");
    }
    out.extend(dialect.footer.iter().cloned());

    log::info!("Done post-processing: {} instruction lines translated", translated);
    Ok(out.into_text())
}
