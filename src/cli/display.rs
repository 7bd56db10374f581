// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the smoki CLI.
//!
//! OneDark colors on dark terminals, One Light on light ones. Detection tries
//! `SMOKI_THEME` first, then `COLORFGBG`, then defaults to dark. `NO_COLOR`
//! and non-TTY stdout turn every escape sequence off, borders included, so
//! piped output is plain text.
//!
//! # Theme detection order
//!
//! 1. `SMOKI_THEME` env var ("dark" or "light")
//! 2. `COLORFGBG` env var (terminal background hint)
//! 3. Default to dark theme

use smoki::signal::{render_bits, BitBlock, SessionReport};
use std::sync::OnceLock;

// Width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 80;

/// Bits shown per row before wrapping.
const BITS_PER_ROW: usize = 64;

// Label column width inside boxes
const LABEL_WIDTH: usize = 14;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

/// Terminal color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("SMOKI_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // COLORFGBG is "fg;bg"; backgrounds 7 and up (except 8) are light
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(bg) = colorfgbg.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                if bg_num >= 7 && bg_num != 8 {
                    return Theme::Light;
                }
            }
        }
    }

    Theme::Dark
}

/// Get the current theme (cached)
pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// PALETTES
// ═══════════════════════════════════════════════════════════════════════════

fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
}

pub use colors::*;

mod onedark {
    pub const RED: (u8, u8, u8) = (224, 108, 117); // #e06c75
    pub const GREEN: (u8, u8, u8) = (152, 195, 121); // #98c379
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123); // #e5c07b
    pub const CYAN: (u8, u8, u8) = (86, 182, 194); // #56b6c2
    pub const GRAY: (u8, u8, u8) = (92, 99, 112); // #5c6370
    pub const BRIGHT_CYAN: (u8, u8, u8) = (102, 217, 239);
}

mod onelight {
    pub const RED: (u8, u8, u8) = (228, 86, 73); // #e45649
    pub const GREEN: (u8, u8, u8) = (80, 161, 79); // #50a14f
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1); // #c18401
    pub const CYAN: (u8, u8, u8) = (1, 132, 188); // #0184bc
    pub const GRAY: (u8, u8, u8) = (160, 161, 167); // #a0a1a7
    pub const BRIGHT_CYAN: (u8, u8, u8) = (1, 112, 158);
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            let (r, g, b) = match theme() {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            };
            rgb(r, g, b)
        }
    };
}

theme_color!(RED);
theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(CYAN);
theme_color!(GRAY);
theme_color!(BRIGHT_CYAN);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Check if colors should be used (TTY detection)
pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Apply theme color with optional modifiers
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Visible length, ignoring ANSI escape sequences
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

/// Right-pad a styled string to a fixed visible width
pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

fn border(text: &str) -> String {
    themed(GRAY, &[], text)
}

/// Print a content line: │ content          │
pub fn row(content: &str) {
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!("{}{}{}{}", border("│"), content, " ".repeat(pad), border("│"));
}

/// Print section header: ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}{}{}",
        border("┌"),
        label_part,
        border(&format!("{}┐", "─".repeat(remaining)))
    );
}

/// Print section divider: ├─ LABEL ──────────┤
pub fn section_mid(label: &str) {
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}{}{}",
        border("├"),
        label_part,
        border(&format!("{}┤", "─".repeat(remaining)))
    );
}

/// Print section footer: └──────────────────┘
pub fn section_bot() {
    println!("{}", border(&format!("└{}┘", "─".repeat(BOX_WIDTH))));
}

/// Print ` label : value` rows, wrapping long values under the label.
pub fn field(label: &str, value: &str) {
    let chunks = wrap(value, BITS_PER_ROW);
    for (i, chunk) in chunks.iter().enumerate() {
        let name = if i == 0 { label } else { "" };
        let separator = if i == 0 { ":" } else { " " };
        row(&format!(
            " {} {} {}",
            pad_right(&themed(GRAY, &[], name), LABEL_WIDTH),
            separator,
            chunk
        ));
    }
}

/// Split a plain string into pieces of at most `width` characters.
fn wrap(value: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = value.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars.chunks(width).map(|c| c.iter().collect()).collect()
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Bits as 1/0 with set bits highlighted
pub fn bits_colored(bits: &BitBlock) -> String {
    let plain = render_bits(bits);
    if !use_colors() {
        return plain;
    }
    wrap(&plain, BITS_PER_ROW)
        .into_iter()
        .map(|chunk| {
            chunk
                .chars()
                .map(|c| match c {
                    '1' => themed(GREEN, &[BOLD], "1"),
                    _ => themed(GRAY, &[], "0"),
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn bit_field(label: &str, bits: &BitBlock) {
    if use_colors() {
        for (i, line) in bits_colored(bits).lines().enumerate() {
            let name = if i == 0 { label } else { "" };
            let separator = if i == 0 { ":" } else { " " };
            row(&format!(
                " {} {} {}",
                pad_right(&themed(GRAY, &[], name), LABEL_WIDTH),
                separator,
                line
            ));
        }
    } else {
        field(label, &render_bits(bits));
    }
}

/// DELIVERED / CORRUPTED badge
pub fn delivered_badge(delivered: bool) -> String {
    if delivered {
        themed(GREEN, &[BOLD], "DELIVERED")
    } else {
        themed(RED, &[BOLD], "CORRUPTED")
    }
}

/// Big banner printed once per invocation.
pub fn banner() {
    println!("{}", themed(BRIGHT_CYAN, &[BOLD], "- Smoki -"));
}

/// Print one session as a box.
pub fn print_report(report: &SessionReport) {
    let width = report.config.message_bits as usize;

    section_top(&format!("SESSION \"{}\"", report.text));
    field("message", &format!("{} ({:0width$b})", report.message, report.message, width = width));
    field("flip odds", &format!("1 in {}", report.config.flip_odds));
    if let Some(seed) = report.config.seed {
        field("seed", &seed.to_string());
    }
    bit_field("initial", &report.initial);

    for round in report.rounds.iter() {
        section_mid(&format!("ROUND {}", round.index));
        field("sent", if round.sent { "1" } else { "0" });
        bit_field("shared state", &round.shared);
        bit_field("hints", &round.hints);
        field("ones", &round.ones.to_string());
    }

    section_mid("RESULT");
    bit_field("final state", &report.final_state);
    field(
        "received",
        &format!("{} ({:0width$b})", report.received, report.received, width = width),
    );
    field("status", &delivered_badge(report.delivered));
    section_bot();
}

/// Print the encoding of `text` and the block that holds it.
pub fn print_encoding(text: &str, bits: &BitBlock) {
    section_top("ENCODE");
    field("text", text);
    bit_field("bits", bits);
    field("length", &bits.len().to_string());
    field("capacity", &bits.capacity().to_string());
    section_bot();
}

/// Print sorted values, one per row, plus an optional search outcome.
pub fn print_sorted(label: &str, values: &[String], found: Option<(&str, bool)>) {
    section_top(label);
    for (i, value) in values.iter().enumerate() {
        row(&format!(" {:>4}  {}", themed(GRAY, &[], &i.to_string()), value));
    }
    if let Some((key, hit)) = found {
        section_mid("SEARCH");
        let outcome = if hit {
            themed(GREEN, &[BOLD], "found")
        } else {
            themed(YELLOW, &[BOLD], "not found")
        };
        field(key, &outcome);
    }
    section_bot();
}
