use std::fmt;
use std::str::FromStr;

use crate::error::DashboardError;

/// One section of the console. Exactly one is visible at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Panel {
    #[default]
    Overview,
    Services,
    Containers,
    Monitoring,
    Logs,
    Settings,
}

impl Panel {
    pub const COUNT: usize = 6;

    /// Navigation order, also the order of the tab bar.
    pub const ALL: [Panel; Panel::COUNT] = [
        Panel::Overview,
        Panel::Services,
        Panel::Containers,
        Panel::Monitoring,
        Panel::Logs,
        Panel::Settings,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Panel::Overview => "overview",
            Panel::Services => "services",
            Panel::Containers => "containers",
            Panel::Monitoring => "monitoring",
            Panel::Logs => "logs",
            Panel::Settings => "settings",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Panel::Overview => 0,
            Panel::Services => 1,
            Panel::Containers => 2,
            Panel::Monitoring => 3,
            Panel::Logs => 4,
            Panel::Settings => 5,
        }
    }

    /// Digit key that jumps straight to this panel.
    pub fn hotkey(self) -> char {
        char::from(b'1' + self.index() as u8)
    }

    pub fn from_hotkey(c: char) -> Option<Panel> {
        let idx = c.to_digit(10)?.checked_sub(1)? as usize;
        Panel::ALL.get(idx).copied()
    }

    pub fn next(self) -> Panel {
        Panel::ALL[(self.index() + 1) % Panel::COUNT]
    }

    pub fn prev(self) -> Panel {
        Panel::ALL[(self.index() + Panel::COUNT - 1) % Panel::COUNT]
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Panel::Overview => write!(f, "Overview"),
            Panel::Services => write!(f, "Services"),
            Panel::Containers => write!(f, "Containers"),
            Panel::Monitoring => write!(f, "Monitoring"),
            Panel::Logs => write!(f, "Logs"),
            Panel::Settings => write!(f, "Settings"),
        }
    }
}

impl FromStr for Panel {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Panel::ALL
            .iter()
            .copied()
            .find(|p| p.id() == s)
            .ok_or_else(|| DashboardError::InvalidPanel { id: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_from_str() {
        for panel in Panel::ALL {
            assert_eq!(panel.id().parse::<Panel>().unwrap(), panel);
        }
    }

    #[test]
    fn unknown_id_is_invalid_panel() {
        let err = "dashboard".parse::<Panel>().unwrap_err();
        assert!(matches!(err, DashboardError::InvalidPanel { ref id } if id == "dashboard"));
    }

    #[test]
    fn hotkeys_map_to_panels() {
        assert_eq!(Panel::Overview.hotkey(), '1');
        assert_eq!(Panel::Settings.hotkey(), '6');
        assert_eq!(Panel::from_hotkey('3'), Some(Panel::Containers));
        assert_eq!(Panel::from_hotkey('0'), None);
        assert_eq!(Panel::from_hotkey('7'), None);
        assert_eq!(Panel::from_hotkey('x'), None);
    }

    #[test]
    fn next_and_prev_wrap() {
        assert_eq!(Panel::Settings.next(), Panel::Overview);
        assert_eq!(Panel::Overview.prev(), Panel::Settings);
        assert_eq!(Panel::Services.next(), Panel::Containers);
    }

    #[test]
    fn default_is_overview() {
        assert_eq!(Panel::default(), Panel::Overview);
    }
}
