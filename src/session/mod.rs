//! Keystroke-driven calculator session.
//!
//! A session owns the expression typed so far and turns discrete input
//! events into display state, handing finished expressions to the
//! evaluator on Equals.

mod input;
mod projection;
mod record;

pub use input::{Input, MemoryOp, Operator};
pub use projection::Projection;
pub use record::{CalculationRecord, SessionHooks};

use crate::calculator::{
    AngleMode, CalcError, Constant, UnaryFunction, evaluate_rounded, format_number, open_depth,
    round_significant,
};
use crate::config::CalculatorConfig;
use tracing::{debug, trace};

/// Where the session is in its input cycle.
#[derive(Clone, Debug, PartialEq)]
pub enum EntryState {
    /// Normal typing.
    Entering,
    /// Showing a result or a recalled value; the next digit starts over.
    ResultSettled,
    /// The last calculation failed; only recovery input is accepted.
    ErrorLocked(CalcError),
}

/// State of one calculator widget.
#[derive(Debug)]
pub struct CalculatorSession {
    config: CalculatorConfig,
    /// Expression already locked in; ends in an operator, `(` or `)` when
    /// non-empty.
    committed: String,
    /// Operand being typed. Empty while nothing has been typed after an
    /// operator, `(` or `)`, which keeps a typed `0` apart from the
    /// placeholder.
    operand: String,
    state: EntryState,
    angle_mode: AngleMode,
    memory: f64,
    hooks: SessionHooks,
}

impl Default for CalculatorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorSession {
    pub fn new() -> Self {
        Self::with_config(CalculatorConfig::default())
    }

    pub fn with_config(config: CalculatorConfig) -> Self {
        Self {
            angle_mode: config.angle_mode,
            config,
            committed: String::new(),
            operand: "0".to_string(),
            state: EntryState::Entering,
            memory: 0.0,
            hooks: SessionHooks::default(),
        }
    }

    /// Attach host callbacks.
    pub fn with_hooks(mut self, hooks: SessionHooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    pub fn committed_expression(&self) -> &str {
        &self.committed
    }

    /// The operand being typed; `"0"` while waiting for one after an
    /// operator or `(`, empty right after `)`.
    pub fn current_operand(&self) -> &str {
        if self.has_placeholder() {
            "0"
        } else {
            &self.operand
        }
    }

    pub fn state(&self) -> &EntryState {
        &self.state
    }

    pub fn is_error(&self) -> bool {
        matches!(self.state, EntryState::ErrorLocked(_))
    }

    pub fn is_result_settled(&self) -> bool {
        self.state == EntryState::ResultSettled
    }

    /// The error that locked the session, if any.
    pub fn error(&self) -> Option<&CalcError> {
        match &self.state {
            EntryState::ErrorLocked(err) => Some(err),
            _ => None,
        }
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    pub fn memory(&self) -> f64 {
        self.memory
    }

    /// Dispatch one event and return the new projection.
    pub fn apply(&mut self, input: Input) -> Projection {
        match input {
            Input::Digit(d) => self.press_digit(d),
            Input::Decimal => self.press_decimal(),
            Input::Operator(op) => self.press_operator(op),
            Input::OpenParen => self.press_open_paren(),
            Input::CloseParen => self.press_close_paren(),
            Input::Equals => self.press_equals(),
            Input::Unary(function) => self.press_unary(function),
            Input::Constant(constant) => self.press_constant(constant),
            Input::ToggleSign => self.press_toggle_sign(),
            Input::Backspace => self.press_backspace(),
            Input::ClearAll => self.press_clear_all(),
            Input::Memory(op) => self.press_memory(op),
            Input::ToggleAngleMode => self.toggle_angle_mode(),
        }
        self.projection()
    }

    /// Digit keys. Ignored while error-locked and when the display is full.
    pub fn press_digit(&mut self, digit: u8) {
        if self.rejects_input("digit") {
            return;
        }
        let Some(d) = char::from_digit(u32::from(digit), 10) else {
            trace!(digit, "not a decimal digit");
            return;
        };

        if self.state == EntryState::ResultSettled {
            self.committed.clear();
            self.operand = d.to_string();
            self.state = EntryState::Entering;
            return;
        }

        match self.operand.as_str() {
            // Right after `)`: `(1+2)3` means `(1+2)*3`.
            "" if self.after_close_paren() => {
                if self.fits(1, 1) {
                    self.committed.push('*');
                    self.operand = d.to_string();
                }
            }
            "" | "0" => {
                if self.fits(0, 1) {
                    self.operand = d.to_string();
                }
            }
            "-0" => {
                if self.fits(0, 2) {
                    self.operand = format!("-{}", d);
                }
            }
            _ => {
                if self.fits(0, self.operand.len() + 1) && self.operand_fits(1) {
                    self.operand.push(d);
                } else {
                    trace!(%d, "display full, digit dropped");
                }
            }
        }
    }

    /// Decimal point. At most one per operand.
    pub fn press_decimal(&mut self) {
        if self.rejects_input("decimal") {
            return;
        }

        if self.state == EntryState::ResultSettled {
            self.committed.clear();
            self.operand = "0.".to_string();
            self.state = EntryState::Entering;
            return;
        }

        if self.operand.contains('.') {
            return;
        }
        match self.operand.as_str() {
            "" if self.after_close_paren() => {
                if self.fits(1, 2) {
                    self.committed.push('*');
                    self.operand = "0.".to_string();
                }
            }
            "" => {
                if self.fits(0, 2) {
                    self.operand = "0.".to_string();
                }
            }
            "-" => self.operand = "-0.".to_string(),
            _ => {
                if self.fits(0, self.operand.len() + 1) && self.operand_fits(1) {
                    self.operand.push('.');
                }
            }
        }
    }

    /// Binary operator. A `-` on a fresh expression or right after `(`
    /// starts a negative number instead, and an operator typed over a
    /// dangling operator replaces it.
    pub fn press_operator(&mut self, op: Operator) {
        if self.rejects_input("operator") {
            return;
        }
        let symbol = op.symbol();

        if self.state == EntryState::ResultSettled {
            if self.fits(self.operand.len() + 1, 0) {
                self.commit_operand();
                self.committed.push(symbol);
                self.state = EntryState::Entering;
            }
            return;
        }

        match self.operand.as_str() {
            // A lone sign is waiting for its digits.
            "-" => {}
            "" if self.after_close_paren() => {
                if self.fits(1, 0) {
                    self.committed.push(symbol);
                }
            }
            "" if self.committed.ends_with('(') => {
                if op == Operator::Subtract {
                    self.operand = "-".to_string();
                }
            }
            "" => {
                self.committed.pop();
                self.committed.push(symbol);
            }
            "0" if self.committed.is_empty() && op == Operator::Subtract => {
                self.operand = "-".to_string();
            }
            _ => {
                if self.fits(self.operand.len() + 1, 0) {
                    self.commit_operand();
                    self.committed.push(symbol);
                }
            }
        }
    }

    /// Opening parenthesis, with an implicit `*` after a number or `)`.
    pub fn press_open_paren(&mut self) {
        if self.rejects_input("open paren") {
            return;
        }

        let settled = self.state == EntryState::ResultSettled;
        let prefix = match self.operand.as_str() {
            _ if settled => format!("{}*(", self.operand),
            "" if self.after_close_paren() => "*(".to_string(),
            "" => "(".to_string(),
            "-" => "-(".to_string(),
            "0" if self.committed.is_empty() => "(".to_string(),
            number => format!("{}*(", number.trim_end_matches('.')),
        };

        if !self.fits(prefix.len(), 0) {
            trace!("display full, paren dropped");
            return;
        }
        self.committed.push_str(&prefix);
        self.operand.clear();
        self.state = EntryState::Entering;
    }

    /// Closing parenthesis. Ignored when nothing is open or nothing would be
    /// closed.
    pub fn press_close_paren(&mut self) {
        if self.rejects_input("close paren") {
            return;
        }
        if open_depth(&self.committed) == 0 || self.operand == "-" || self.has_placeholder() {
            trace!(committed = %self.committed, "close paren ignored");
            return;
        }
        if !self.fits(self.operand.len() + 1, 0) {
            return;
        }

        self.commit_operand();
        self.committed.push(')');
        self.state = EntryState::Entering;
    }

    /// Evaluate the assembled expression.
    pub fn press_equals(&mut self) {
        if self.rejects_input("equals") {
            return;
        }
        if self.state == EntryState::ResultSettled && self.committed.is_empty() {
            // A bare settled number evaluates to itself.
            return;
        }

        let expression = format!("{}{}", self.committed, self.operand);
        debug!(%expression, mode = %self.angle_mode, "evaluating");

        let outcome = evaluate_rounded(
            &expression,
            self.angle_mode,
            self.config.significant_digits,
        )
        .and_then(|value| format_number(value, &self.config));

        match outcome {
            Ok(text) => {
                debug!(%expression, result = %text, "evaluated");
                self.hooks
                    .notify(&CalculationRecord::success(&expression, &text));
                self.committed.clear();
                self.operand = text;
                self.state = EntryState::ResultSettled;
            }
            Err(err) => {
                debug!(%expression, error = %err, "evaluation failed");
                self.hooks.notify(&CalculationRecord::failure(
                    &expression,
                    &self.config.error_indicator,
                    err.clone(),
                ));
                self.state = EntryState::ErrorLocked(err);
            }
        }
    }

    /// Apply a unary function to the current operand right away.
    pub fn press_unary(&mut self, function: UnaryFunction) {
        if self.rejects_input("unary function") {
            return;
        }
        let Ok(value) = self.current_operand().parse::<f64>() else {
            trace!(operand = %self.operand, %function, "no operand for function");
            return;
        };

        if let Err(err) = function.check_domain(value, self.angle_mode) {
            debug!(%function, value, "domain error");
            self.state = EntryState::ErrorLocked(err);
            return;
        }

        let result = round_significant(
            function.apply(value, self.angle_mode),
            self.config.significant_digits,
        );
        self.settle(result);
    }

    /// Recall `pi` or `e` as if it were a result.
    pub fn press_constant(&mut self, constant: Constant) {
        if self.rejects_input("constant") {
            return;
        }
        self.recall(constant.value());
    }

    /// Flip the sign of the current operand. A settled result is negated
    /// and reformatted, so it still fits the operand cap.
    pub fn press_toggle_sign(&mut self) {
        if self.rejects_input("toggle sign") || self.after_close_paren() {
            return;
        }
        if self.state == EntryState::ResultSettled
            && let Ok(value) = self.operand.parse::<f64>()
        {
            self.settle(-value);
            return;
        }
        if self.operand.is_empty() {
            if self.fits(0, 2) {
                self.operand = "-0".to_string();
            }
            return;
        }
        match self.operand.strip_prefix('-') {
            Some("") => self.operand = self.empty_operand(),
            Some(rest) => self.operand = rest.to_string(),
            None => {
                if self.operand_fits(1) && self.fits(0, self.operand.len() + 1) {
                    self.operand.insert(0, '-');
                } else {
                    trace!(operand = %self.operand, "display full, sign dropped");
                }
            }
        }
    }

    /// Delete one character. After a result or an error this clears everything.
    pub fn press_backspace(&mut self) {
        if self.state != EntryState::Entering {
            self.press_clear_all();
            return;
        }

        let fresh_zero = self.committed.is_empty() && self.operand == "0";
        if !self.operand.is_empty() && !fresh_zero {
            self.operand.pop();
            if self.operand.is_empty() || self.operand == "-" {
                self.operand = self.empty_operand();
            }
            return;
        }

        if self.committed.pop().is_some() {
            self.reclaim_operand();
        }
    }

    /// Reset everything except memory. The angle mode goes back to the
    /// configured default too, including when Backspace clears a result or
    /// an error.
    pub fn press_clear_all(&mut self) {
        self.clear_entry();
        self.angle_mode = self.config.angle_mode;
    }

    pub fn press_memory(&mut self, op: MemoryOp) {
        match op {
            MemoryOp::Clear => self.memory = 0.0,
            MemoryOp::Recall => {
                if self.is_error() {
                    self.clear_entry();
                }
                self.recall(self.memory);
            }
            MemoryOp::Add | MemoryOp::Subtract => {
                if self.rejects_input("memory") {
                    return;
                }
                let Ok(value) = self.current_operand().parse::<f64>() else {
                    return;
                };
                let delta = if op == MemoryOp::Add { value } else { -value };
                self.memory =
                    round_significant(self.memory + delta, self.config.significant_digits) + 0.0;
                debug!(memory = self.memory, "memory updated");
            }
        }
    }

    /// Switch between degrees and radians. Only the flag changes.
    pub fn toggle_angle_mode(&mut self) {
        self.angle_mode = self.angle_mode.toggled();
    }

    /// Text for the display, cut from the left to the expression cap.
    ///
    /// The placeholder operand is never shown, so `3+` reads `3+`, not `3+0`.
    pub fn display_text(&self) -> String {
        let text = match self.state {
            EntryState::ErrorLocked(_) => return self.config.error_indicator.clone(),
            EntryState::ResultSettled => self.operand.clone(),
            EntryState::Entering => format!("{}{}", self.committed, self.operand),
        };

        let len = text.chars().count();
        let max = self.config.max_expression_len;
        if len <= max {
            text
        } else {
            text.chars().skip(len - max).collect()
        }
    }

    pub fn projection(&self) -> Projection {
        Projection {
            display_text: self.display_text(),
            is_error: self.is_error(),
            angle_mode: self.angle_mode,
            has_memory_value: self.memory != 0.0,
        }
    }

    fn rejects_input(&self, what: &str) -> bool {
        if self.is_error() {
            trace!(input = what, "ignored while error-locked");
            return true;
        }
        false
    }

    fn clear_entry(&mut self) {
        self.committed.clear();
        self.operand = "0".to_string();
        self.state = EntryState::Entering;
    }

    fn fits(&self, committed_extra: usize, operand_len: usize) -> bool {
        self.committed.len() + committed_extra + operand_len <= self.config.max_expression_len
    }

    fn operand_fits(&self, extra: usize) -> bool {
        self.operand.len() + extra <= self.config.max_operand_len
    }

    fn committed_dangles(&self) -> bool {
        self.committed
            .ends_with(|c: char| c == '(' || Operator::is_symbol(c))
    }

    fn after_close_paren(&self) -> bool {
        self.operand.is_empty() && self.committed.ends_with(')')
    }

    /// Nothing typed yet after an operator or `(`.
    fn has_placeholder(&self) -> bool {
        self.operand.is_empty() && self.committed_dangles()
    }

    /// What the operand slot holds when nothing is typed.
    fn empty_operand(&self) -> String {
        if self.committed.is_empty() {
            "0".to_string()
        } else {
            String::new()
        }
    }

    fn commit_operand(&mut self) {
        let operand = std::mem::take(&mut self.operand);
        self.committed.push_str(operand.trim_end_matches('.'));
    }

    /// Show a value as a settled result in the operand slot.
    fn settle(&mut self, value: f64) {
        match format_number(value, &self.config) {
            Ok(text) => {
                self.operand = text;
                self.state = EntryState::ResultSettled;
            }
            Err(err) => self.state = EntryState::ErrorLocked(err),
        }
    }

    /// Show a recalled value. Recalling over a settled result starts over;
    /// recalling while typing keeps the expression.
    fn recall(&mut self, value: f64) {
        if self.state == EntryState::ResultSettled {
            self.committed.clear();
        }
        let entering = self.state == EntryState::Entering;
        let value = if entering && self.operand == "-" {
            -value
        } else {
            value
        };
        if entering && self.after_close_paren() {
            self.committed.push('*');
        }
        self.settle(value);
    }

    /// After deleting from the committed expression, move a trailing number
    /// back into the operand slot so the committed part ends in an operator,
    /// a parenthesis, or nothing.
    fn reclaim_operand(&mut self) {
        let bytes = self.committed.as_bytes();
        let mut start = bytes.len();
        while start > 0 {
            let c = bytes[start - 1];
            let in_number = c.is_ascii_digit()
                || c == b'.'
                || c == b'e'
                || ((c == b'-' || c == b'+') && start >= 2 && bytes[start - 2] == b'e');
            if !in_number {
                break;
            }
            start -= 1;
        }

        if start < bytes.len() {
            let mut number = self.committed.split_off(start);
            if self.committed.ends_with('-') {
                let before = self.committed[..self.committed.len() - 1].chars().last();
                if before.is_none_or(|c| c == '(' || Operator::is_symbol(c)) {
                    self.committed.pop();
                    number.insert(0, '-');
                }
            }
            self.operand = number;
        } else {
            self.operand = self.empty_operand();
        }
    }
}
