//! Emoji used in session output, with plain fallbacks for dumb terminals.

use console::Emoji;

pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK] ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "[ERR] ");
pub static WAVE: Emoji<'_, '_> = Emoji("👋 ", "");
