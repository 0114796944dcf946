/// One row of the services table.
#[derive(Clone, Debug, PartialEq)]
pub struct ServiceRow {
    pub name: String,
    pub display_name: String,
    pub port: Option<u16>,
    pub state: ServiceState,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ServiceState {
    #[default]
    Unknown,
    Up,
    Down,
}

impl ServiceState {
    pub fn label(self) -> &'static str {
        match self {
            ServiceState::Unknown => "-",
            ServiceState::Up => "running",
            ServiceState::Down => "stopped",
        }
    }
}

impl ServiceRow {
    pub fn port_label(&self) -> String {
        self.port.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string())
    }
}
