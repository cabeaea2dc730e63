//! Console banners shown around an orchestration run.
//!
//! Renders the startup box and the two closing banners (complete or
//! interrupted). Colors are plain ANSI escapes; callers decide whether color is
//! enabled.

use crate::orchestrator::OrchestrationOutcome;

// ---------------------------------------------------------------------------
// ANSI color helpers
// ---------------------------------------------------------------------------

pub const RESET: &str = "\x1b[0m";
pub const MAGENTA: &str = "\x1b[0;35m";
pub const RED: &str = "\x1b[0;31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";

const BOX_WIDTH: usize = 66;
const STRIP_WIDTH: usize = 61;
const STRIP_INDENT: &str = "        ";
// Blank padding line printed after the startup box.
const BOX_TRAILER: &str = "    \n";

/// Returns `code` when color is enabled, otherwise an empty string.
pub fn paint(code: &'static str, color: bool) -> &'static str {
    if color { code } else { "" }
}

// ---------------------------------------------------------------------------
// Box drawing
// ---------------------------------------------------------------------------

fn box_top() -> String {
    format!("╔{}╗", "═".repeat(BOX_WIDTH))
}

fn box_bottom() -> String {
    format!("╚{}╝", "═".repeat(BOX_WIDTH))
}

fn strip_rule() -> String {
    "▀".repeat(STRIP_WIDTH)
}

fn boxed(lines: &[&str]) -> String {
    let mut out = String::from("\n");
    out.push_str(&box_top());
    out.push('\n');
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(&box_bottom());
    out.push('\n');
    out
}

fn strip(code: &'static str, color: bool, items: &[&str]) -> String {
    let mut out = String::new();
    out.push_str(paint(code, color));
    out.push_str(&strip_rule());
    out.push('\n');
    for item in items {
        out.push_str(STRIP_INDENT);
        out.push_str(item);
        out.push('\n');
    }
    out.push_str(&strip_rule());
    out.push_str(paint(RESET, color));
    out.push('\n');
    out.push_str(STRIP_INDENT);
    out.push('\n');
    out
}

// ---------------------------------------------------------------------------
// Banners
// ---------------------------------------------------------------------------

pub fn startup_banner() -> String {
    let mut out = boxed(&[
        "║              LLM TASK ORCHESTRATOR SYSTEM v1.0                   ║",
        "║                  [ ReACT Agent Framework ]                       ║",
    ]);
    out.push_str(BOX_TRAILER);
    out
}

pub fn completion_banner(color: bool) -> String {
    let mut out = boxed(&["║             🌟 TASK ORCHESTRATION COMPLETE 🌟                    ║"]);
    out.push_str(&strip(
        MAGENTA,
        color,
        &[
            "✨ ALL OBJECTIVES ACHIEVED",
            "📊 PERFORMANCE METRICS OPTIMAL",
            "🔒 SYSTEM INTEGRITY MAINTAINED",
        ],
    ));
    out
}

pub fn interrupted_banner(color: bool) -> String {
    let mut out = boxed(&["║             ⚠️ TASK ORCHESTRATION INTERRUPTED ⚠️                ║"]);
    out.push_str(&strip(
        RED,
        color,
        &[
            "🔍 DIAGNOSTIC SCAN INITIATED",
            "💫 QUANTUM STATE PRESERVED",
            "🔄 READY FOR REACTIVATION",
        ],
    ));
    out
}

/// Picks the closing banner for an outcome.
pub fn outcome_banner(outcome: &OrchestrationOutcome, color: bool) -> String {
    if outcome.is_success() {
        completion_banner(color)
    } else {
        interrupted_banner(color)
    }
}

/// Short colored status word used by doctor output.
pub fn status_word(ok: bool, color: bool) -> String {
    if ok {
        format!("{}ok{}", paint(GREEN, color), paint(RESET, color))
    } else {
        format!("{}missing{}", paint(YELLOW, color), paint(RESET, color))
    }
}
