//! Exam mode
//!
//! A one-shot presentation mode: the clock grows, turns black and opaque,
//! the window locks, and a header plus two banner lines frame the time.
//! The flag lives only in the session; `disable` runs before every store.

use crate::clock::DEFAULT_TEMPLATE;
use crate::config::Configuration;
use crate::palette::FontColor;

pub const EXAM_HEADER: &str = "考试进行中";
pub const EXAM_BANNERS: [&str; 2] = ["诚信应考", "请勿交头接耳"];
pub const EXAM_FONT_SIZE: u32 = 50;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExamMode {
    active: bool,
}

impl ExamMode {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Enter exam mode. Returns false (and changes nothing) if already active.
    pub fn enable(&mut self, config: &mut Configuration) -> bool {
        if self.active {
            return false;
        }

        config.timer.template = format!(
            "{}\n{}\n{}\n{}",
            EXAM_HEADER, config.timer.template, EXAM_BANNERS[0], EXAM_BANNERS[1]
        );
        config.font.size = EXAM_FONT_SIZE;
        config.font.color = FontColor::Black;
        config.window.opacity = 1.0;
        config.window.locked = true;
        self.active = true;

        tracing::info!("Exam mode enabled");
        true
    }

    /// Leave exam mode, restoring the bare time template.
    /// Returns whether exam mode was active.
    pub fn disable(&mut self, config: &mut Configuration) -> bool {
        let was_active = self.active;
        config.timer.template = DEFAULT_TEMPLATE.to_string();
        self.active = false;

        if was_active {
            tracing::info!("Exam mode disabled");
        }
        was_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enable_forces_presentation() {
        let mut config = Configuration::default();
        config.font.size = 30;
        config.font.color = FontColor::Pink;
        config.window.opacity = 0.3;
        config.window.locked = false;

        let mut exam = ExamMode::default();
        assert!(exam.enable(&mut config));
        assert!(exam.is_active());
        assert_eq!(config.font.size, EXAM_FONT_SIZE);
        assert_eq!(config.font.color, FontColor::Black);
        assert_eq!(config.window.opacity, 1.0);
        assert!(config.window.locked);
        assert!(config.timer.template.starts_with(EXAM_HEADER));
        assert!(config.timer.template.ends_with(EXAM_BANNERS[1]));
        assert!(config.timer.template.contains(DEFAULT_TEMPLATE));
    }

    #[test]
    fn test_enable_twice_equals_once() {
        let mut config = Configuration::default();
        let mut exam = ExamMode::default();
        exam.enable(&mut config);
        let once = config.clone();

        assert!(!exam.enable(&mut config));
        assert_eq!(config, once);
    }

    #[test]
    fn test_disable_restores_template() {
        let mut config = Configuration::default();
        let mut exam = ExamMode::default();
        exam.enable(&mut config);

        assert!(exam.disable(&mut config));
        assert!(!exam.is_active());
        assert_eq!(config.timer.template, "%H:%M:%S");
        assert!(!exam.disable(&mut config));
    }
}
