//! Role classes and the injected stylesheet.

use pinpoint_config::{SelectionPolicy, StyleConfig};

/// CSS class names for each visual role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleClasses {
    pub highlight: String,
    pub locked: String,
    pub primary: String,
    pub secondary: String,
}

impl RoleClasses {
    pub fn from_config(styles: &StyleConfig) -> Self {
        Self {
            highlight: styles.highlight_class.clone(),
            locked: styles.locked_class.clone(),
            primary: styles.primary_class.clone(),
            secondary: styles.secondary_class.clone(),
        }
    }

    /// Class for the first locked element under `policy`.
    pub fn lead(&self, policy: SelectionPolicy) -> &str {
        match policy {
            SelectionPolicy::SingleLock => &self.locked,
            SelectionPolicy::DualRole => &self.primary,
        }
    }

    /// Every class that marks an element as locked in some role.
    pub fn locked_roles(&self) -> [&str; 3] {
        [&self.locked, &self.primary, &self.secondary]
    }
}

impl Default for RoleClasses {
    fn default() -> Self {
        Self::from_config(&StyleConfig::default())
    }
}

/// Stylesheet for the role classes.
pub fn stylesheet(styles: &StyleConfig, cursor: &str) -> String {
    let rule = |class: &str, color: &str, background: &str| {
        format!(
            ".{class} {{\n  outline: 2px solid {color} !important;\n  \
             outline-offset: -1px !important;\n  background-color: {background} !important;\n  \
             cursor: {cursor} !important;\n}}\n"
        )
    };

    let mut css = String::new();
    css.push_str(&rule(
        &styles.highlight_class,
        &styles.highlight_color,
        "rgba(30, 144, 255, 0.08)",
    ));
    css.push_str(&rule(
        &styles.locked_class,
        &styles.locked_color,
        "rgba(255, 69, 0, 0.12)",
    ));
    css.push_str(&rule(
        &styles.primary_class,
        &styles.primary_color,
        "rgba(255, 215, 0, 0.15)",
    ));
    css.push_str(&rule(
        &styles.secondary_class,
        &styles.secondary_color,
        "rgba(50, 205, 50, 0.12)",
    ));
    css
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_class_per_policy() {
        let classes = RoleClasses::default();
        assert_eq!(classes.lead(SelectionPolicy::SingleLock), "pinpoint-locked");
        assert_eq!(classes.lead(SelectionPolicy::DualRole), "pinpoint-primary");
    }

    #[test]
    fn test_locked_roles_exclude_highlight() {
        let classes = RoleClasses::default();
        assert!(!classes.locked_roles().contains(&classes.highlight.as_str()));
    }

    #[test]
    fn test_stylesheet_mentions_every_class() {
        let styles = StyleConfig::default();
        let css = stylesheet(&styles, "crosshair");
        for class in [
            &styles.highlight_class,
            &styles.locked_class,
            &styles.primary_class,
            &styles.secondary_class,
        ] {
            assert!(css.contains(&format!(".{class} {{")));
        }
        assert!(css.contains("gold"));
        assert!(css.contains("cursor: crosshair"));
    }
}
