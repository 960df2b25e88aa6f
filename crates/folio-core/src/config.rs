#![forbid(unsafe_code)]

//! Effect configuration.
//!
//! Every tunable constant of the page effects lives in [`EffectsConfig`].
//! Defaults reproduce the shipped portfolio page; the host may override any
//! subset by passing a JSON object (camelCase keys, every field optional).
//!
//! ```
//! use folio_core::config::EffectsConfig;
//!
//! let cfg = EffectsConfig::from_json_str(r#"{ "scrollSpy": { "lookahead": 120 } }"#).unwrap();
//! assert_eq!(cfg.scroll_spy.lookahead, 120.0);
//! assert_eq!(cfg.navbar.scrolled_threshold, 50.0);
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::typewriter::TypewriterTimings;

/// Configuration parse or validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The options object was not valid JSON for the schema.
    Parse(String),
    /// A field holds a value that would break an effect invariant.
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "invalid effects options: {msg}"),
            Self::Invalid { field, reason } => write!(f, "invalid `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Root configuration for every page effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EffectsConfig {
    pub selectors: Selectors,
    pub navbar: NavbarConfig,
    pub menu: MenuConfig,
    pub anchor: AnchorConfig,
    pub reveal: RevealConfig,
    pub typewriter: TypewriterConfig,
    pub particles: ParticleConfig,
    pub tilt: TiltConfig,
    pub cursor: CursorConfig,
    pub scroll_spy: ScrollSpyConfig,
    pub contact: ContactConfig,
    /// Maximum tracing level routed to the browser console.
    pub log_level: String,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            navbar: NavbarConfig::default(),
            menu: MenuConfig::default(),
            anchor: AnchorConfig::default(),
            reveal: RevealConfig::default(),
            typewriter: TypewriterConfig::default(),
            particles: ParticleConfig::default(),
            tilt: TiltConfig::default(),
            cursor: CursorConfig::default(),
            scroll_spy: ScrollSpyConfig::default(),
            contact: ContactConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl EffectsConfig {
    /// Parse and validate a JSON options object.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parsed [`Self::log_level`].
    pub fn max_log_level(&self) -> Result<Level, ConfigError> {
        Level::from_str(self.log_level.trim()).map_err(|_| ConfigError::Invalid {
            field: "logLevel",
            reason: "expected one of trace, debug, info, warn, error",
        })
    }

    /// Reject values that would break an effect invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn check(ok: bool, field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
            if ok {
                Ok(())
            } else {
                Err(ConfigError::Invalid { field, reason })
            }
        }

        check(
            self.navbar.scrolled_threshold.is_finite(),
            "navbar.scrolledThreshold",
            "must be finite",
        )?;
        check(
            self.menu.stagger_step_secs.is_finite() && self.menu.stagger_step_secs >= 0.0,
            "menu.staggerStepSecs",
            "must be a non-negative number",
        )?;
        check(
            self.anchor.nav_height.is_finite(),
            "anchor.navHeight",
            "must be finite",
        )?;
        check(
            (0.0..=1.0).contains(&self.reveal.threshold),
            "reveal.threshold",
            "must lie in [0, 1]",
        )?;
        check(
            self.reveal.hidden_offset_px.is_finite(),
            "reveal.hiddenOffsetPx",
            "must be finite",
        )?;

        let tw = &self.typewriter;
        check(!tw.words.is_empty(), "typewriter.words", "must not be empty")?;
        check(
            tw.words.iter().all(|w| !w.is_empty()),
            "typewriter.words",
            "words must not be empty strings",
        )?;
        check(
            tw.type_ms > 0 && tw.delete_ms > 0,
            "typewriter.typeMs",
            "type and delete speeds must be positive",
        )?;

        let p = &self.particles;
        check(p.count > 0, "particles.count", "must be positive")?;
        check(
            p.spread.is_finite() && p.spread > 0.0,
            "particles.spread",
            "must be positive",
        )?;
        check(
            p.point_size.is_finite() && p.point_size > 0.0,
            "particles.pointSize",
            "must be positive",
        )?;
        check(
            (0.0..=1.0).contains(&p.opacity),
            "particles.opacity",
            "must lie in [0, 1]",
        )?;
        check(
            p.fov_deg > 0.0 && p.fov_deg < 180.0,
            "particles.fovDeg",
            "must lie in (0, 180)",
        )?;
        check(
            p.near > 0.0 && p.near < p.far && p.far.is_finite(),
            "particles.near",
            "near must be positive and below far",
        )?;

        check(
            self.tilt.max_deg.is_finite() && self.tilt.max_deg >= 0.0,
            "tilt.maxDeg",
            "must be a non-negative number",
        )?;
        check(
            self.tilt.perspective_px > 0.0,
            "tilt.perspectivePx",
            "must be positive",
        )?;
        check(
            self.cursor.trail_ms.is_finite() && self.cursor.trail_ms >= 0.0,
            "cursor.trailMs",
            "must be a non-negative number",
        )?;
        check(
            self.scroll_spy.lookahead.is_finite(),
            "scrollSpy.lookahead",
            "must be finite",
        )?;

        self.max_log_level().map(|_| ())
    }
}

/// DOM contract: selectors and ids the effects look up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Selectors {
    pub menu_toggle: String,
    /// Icon element inside the menu toggle, relative to the toggle.
    pub menu_icon: String,
    pub nav_links: String,
    pub nav_items: String,
    pub navbar: String,
    pub in_page_anchors: String,
    pub reveal_targets: String,
    pub typing_text: String,
    pub particle_canvas_id: String,
    pub tilt_cards: String,
    pub cursor_dot: String,
    pub cursor_outline: String,
    pub interactive: String,
    pub sections: String,
    pub spy_links: String,
    pub contact_form_id: String,
    pub form_status_id: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            menu_toggle: ".menu-toggle".into(),
            menu_icon: "i".into(),
            nav_links: ".nav-links".into(),
            nav_items: ".nav-links li".into(),
            navbar: ".navbar".into(),
            in_page_anchors: "a[href^=\"#\"]".into(),
            reveal_targets:
                ".section-title, .about-content, .skill-card, .project-card, .contact-card".into(),
            typing_text: ".typing-text".into(),
            particle_canvas_id: "particle-canvas".into(),
            tilt_cards: ".project-card, .skill-card, .stat-card, .about-feat-card".into(),
            cursor_dot: ".cursor-dot".into(),
            cursor_outline: ".cursor-outline".into(),
            interactive: "a, button, .project-card, .skill-card, .menu-toggle, input, textarea"
                .into(),
            sections: "section".into(),
            spy_links: ".nav-links li a".into(),
            contact_form_id: "contact-form".into(),
            form_status_id: "form-status".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavbarConfig {
    /// Scroll offset (CSS px) above which the navbar is styled as scrolled.
    pub scrolled_threshold: f64,
    pub scrolled_class: String,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            scrolled_threshold: 50.0,
            scrolled_class: "scrolled".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MenuConfig {
    pub open_class: String,
    pub closed_icon: String,
    pub open_icon: String,
    /// Entrance delay added per nav item, in seconds.
    pub stagger_step_secs: f64,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            open_class: "active".into(),
            closed_icon: "fa-bars".into(),
            open_icon: "fa-times".into(),
            stagger_step_secs: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnchorConfig {
    /// Fixed navbar height subtracted from anchor scroll targets.
    pub nav_height: f64,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self { nav_height: 80.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RevealConfig {
    /// Visible fraction that counts as an intersection.
    pub threshold: f64,
    pub root_margin: String,
    /// Initial downward offset of hidden elements.
    pub hidden_offset_px: f64,
    pub transition: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".into(),
            hidden_offset_px: 30.0,
            transition: "opacity 0.8s ease-out, transform 0.8s cubic-bezier(0.2, 0, 0.2, 1)".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypewriterConfig {
    pub words: Vec<String>,
    pub type_ms: u64,
    pub delete_ms: u64,
    /// Pause once a word is fully typed.
    pub hold_ms: u64,
    /// Pause after a word is fully deleted.
    pub next_word_ms: u64,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            words: ["Experiences", "Interfaces", "Solutions", "Applications"]
                .into_iter()
                .map(String::from)
                .collect(),
            type_ms: 100,
            delete_ms: 50,
            hold_ms: 2000,
            next_word_ms: 500,
        }
    }
}

impl TypewriterConfig {
    #[must_use]
    pub fn timings(&self) -> TypewriterTimings {
        TypewriterTimings {
            type_delay: Duration::from_millis(self.type_ms),
            delete_delay: Duration::from_millis(self.delete_ms),
            hold_delay: Duration::from_millis(self.hold_ms),
            next_word_delay: Duration::from_millis(self.next_word_ms),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParticleConfig {
    pub count: u32,
    /// Side of the cube the points are scattered in, centered at the origin.
    pub spread: f32,
    /// Point size in world units.
    pub point_size: f32,
    /// Packed `0xRRGGBB`.
    pub color: u32,
    pub opacity: f32,
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    pub camera_z: f32,
    /// Multiplier from page-clock milliseconds to animation time.
    pub time_scale: f32,
    /// Y rotation per unit of animation time.
    pub spin: f32,
    /// Rotation per unit of normalized pointer offset.
    pub pointer_tilt: f32,
    pub breathe_amplitude: f32,
    pub breathe_rate: f32,
    /// Fixed RNG seed; the page clock is used when absent.
    pub seed: Option<u64>,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 1800,
            spread: 15.0,
            point_size: 0.015,
            color: 0xE2E8F0,
            opacity: 0.8,
            fov_deg: 75.0,
            near: 0.1,
            far: 1000.0,
            camera_z: 3.0,
            time_scale: 0.0002,
            spin: 0.1,
            pointer_tilt: 0.05,
            breathe_amplitude: 0.1,
            breathe_rate: 2.0,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TiltConfig {
    pub max_deg: f64,
    pub perspective_px: f64,
    pub hover_scale: f64,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            max_deg: 10.0,
            perspective_px: 1000.0,
            hover_scale: 1.02,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CursorConfig {
    /// Duration of the outline's trailing animation.
    pub trail_ms: f64,
    pub hover_class: String,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            trail_ms: 500.0,
            hover_class: "cursor-hover".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrollSpyConfig {
    /// A section counts as reached this many px before its top.
    pub lookahead: f64,
    pub active_class: String,
}

impl Default for ScrollSpyConfig {
    fn default() -> Self {
        Self {
            lookahead: 200.0,
            active_class: "active".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactConfig {
    pub service_id: String,
    pub template_id: String,
    /// Relay account public key, sent as `user_id`.
    pub public_key: String,
    /// REST endpoint used when no relay client library is loaded.
    pub endpoint: String,
    pub sending_message: String,
    pub success_message: String,
    pub error_message: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            service_id: "service_2s67usl".into(),
            template_id: "template_tzqg9pa".into(),
            public_key: String::new(),
            endpoint: "https://api.emailjs.com/api/v1.0/email/send".into(),
            sending_message: "Sending...".into(),
            success_message: "Message sent successfully!".into(),
            error_message: "Oops! There was a problem submitting your form".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_shipped_page() {
        let cfg = EffectsConfig::default();
        assert_eq!(cfg.navbar.scrolled_threshold, 50.0);
        assert_eq!(cfg.anchor.nav_height, 80.0);
        assert_eq!(cfg.scroll_spy.lookahead, 200.0);
        assert_eq!(cfg.particles.count, 1800);
        assert_eq!(cfg.particles.spread, 15.0);
        assert_eq!(cfg.tilt.max_deg, 10.0);
        assert_eq!(cfg.cursor.trail_ms, 500.0);
        assert_eq!(cfg.typewriter.words.len(), 4);
        assert_eq!(cfg.contact.service_id, "service_2s67usl");
        assert_eq!(cfg.contact.template_id, "template_tzqg9pa");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn empty_object_yields_defaults() {
        let cfg = EffectsConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, EffectsConfig::default());
    }

    #[test]
    fn partial_nested_override_keeps_siblings() {
        let cfg = EffectsConfig::from_json_str(
            r#"{ "particles": { "count": 64, "seed": 7 }, "anchor": { "navHeight": 64 } }"#,
        )
        .unwrap();
        assert_eq!(cfg.particles.count, 64);
        assert_eq!(cfg.particles.seed, Some(7));
        assert_eq!(cfg.particles.spread, 15.0);
        assert_eq!(cfg.anchor.nav_height, 64.0);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = EffectsConfig::from_json_str("{ nope").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn empty_word_list_rejected() {
        let err = EffectsConfig::from_json_str(r#"{ "typewriter": { "words": [] } }"#).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                field: "typewriter.words",
                reason: "must not be empty",
            }
        );
    }

    #[test]
    fn empty_word_rejected() {
        let err =
            EffectsConfig::from_json_str(r#"{ "typewriter": { "words": ["a", ""] } }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "typewriter.words",
                ..
            }
        ));
    }

    #[test]
    fn camera_planes_must_be_ordered() {
        let mut cfg = EffectsConfig::default();
        cfg.particles.near = 10.0;
        cfg.particles.far = 1.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn threshold_outside_unit_interval_rejected() {
        let mut cfg = EffectsConfig::default();
        cfg.reveal.threshold = 1.5;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn cursor_trail_must_be_non_negative() {
        let err =
            EffectsConfig::from_json_str(r#"{ "cursor": { "trailMs": -5 } }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "cursor.trailMs",
                ..
            }
        ));

        let mut cfg = EffectsConfig::default();
        cfg.cursor.trail_ms = f64::NAN;
        assert!(cfg.validate().is_err());
        cfg.cursor.trail_ms = 0.0;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn log_level_parses_case_insensitively() {
        let mut cfg = EffectsConfig::default();
        cfg.log_level = "WARN".into();
        assert_eq!(cfg.max_log_level().unwrap(), Level::WARN);
        cfg.log_level = "loud".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn timings_convert_to_durations() {
        let t = TypewriterConfig::default().timings();
        assert_eq!(t.type_delay, Duration::from_millis(100));
        assert_eq!(t.delete_delay, Duration::from_millis(50));
        assert_eq!(t.hold_delay, Duration::from_millis(2000));
        assert_eq!(t.next_word_delay, Duration::from_millis(500));
    }

    #[test]
    fn display_names_the_field() {
        let err = ConfigError::Invalid {
            field: "tilt.maxDeg",
            reason: "must be a non-negative number",
        };
        assert_eq!(err.to_string(), "invalid `tilt.maxDeg`: must be a non-negative number");
    }
}
