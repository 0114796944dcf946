//! Host resource sampling for the monitoring and overview panels.

use std::collections::HashMap;
use std::time::Instant;

use chrono::Local;
use sysinfo::{Disks, Networks, System};

use crate::model::{LoadLevel, ResourceGauges, SystemInfo};

/// Per-interface cumulative (rx, tx) byte counters.
type NetSnapshot = HashMap<String, (u64, u64)>;

pub struct ResourceSampler {
    sys: System,
    disks: Disks,
    networks: Networks,
    prev_net_snapshot: Option<(Instant, NetSnapshot)>,
}

impl Default for ResourceSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceSampler {
    pub fn new() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();
        Self {
            sys,
            disks: Disks::new_with_refreshed_list(),
            networks: Networks::new_with_refreshed_list(),
            prev_net_snapshot: None,
        }
    }

    /// Take one reading of CPU, memory, disk and network.
    ///
    /// The first call reports zero network throughput since there is no
    /// earlier snapshot to diff against.
    pub fn sample(&mut self) -> ResourceGauges {
        self.sys.refresh_cpu_usage();
        self.sys.refresh_memory();
        self.disks.refresh(true);
        self.networks.refresh(true);

        let cpu_percent = (self.sys.global_cpu_usage() as f64).clamp(0.0, 100.0);
        let memory_percent = percent(self.sys.used_memory(), self.sys.total_memory());

        let root = self
            .disks
            .list()
            .iter()
            .find(|d| d.mount_point() == std::path::Path::new("/"))
            .or_else(|| self.disks.list().first());
        let disk_used_percent = root
            .map(|d| {
                percent(
                    d.total_space().saturating_sub(d.available_space()),
                    d.total_space(),
                )
            })
            .unwrap_or(0.0);

        let now = Instant::now();
        let current: NetSnapshot = self
            .networks
            .list()
            .iter()
            .map(|(name, data)| {
                (
                    name.clone(),
                    (data.total_received(), data.total_transmitted()),
                )
            })
            .collect();
        let (net_in_rate, net_out_rate) = match &self.prev_net_snapshot {
            Some((prev_time, prev)) => {
                network_rates(prev, &current, now.duration_since(*prev_time).as_secs_f64())
            }
            None => (0, 0),
        };
        self.prev_net_snapshot = Some((now, current));

        ResourceGauges {
            cpu_percent,
            memory_percent,
            disk_used_percent,
            net_in_rate,
            net_out_rate,
        }
    }

    pub fn system_info(&mut self) -> SystemInfo {
        let load = System::load_average();
        let cores = self.sys.cpus().len();
        SystemInfo {
            uptime_secs: System::uptime(),
            load_1m: load.one,
            load: LoadLevel::classify(load.one, cores),
            last_update: Local::now(),
        }
    }
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        (part as f64 / whole as f64 * 100.0).clamp(0.0, 100.0)
    }
}

/// Summed bytes/sec across interfaces present in both snapshots.
fn network_rates(prev: &NetSnapshot, curr: &NetSnapshot, secs: f64) -> (u64, u64) {
    if secs <= 0.0 {
        return (0, 0);
    }
    let mut rx_total = 0u64;
    let mut tx_total = 0u64;
    for (name, (curr_rx, curr_tx)) in curr {
        if let Some((prev_rx, prev_tx)) = prev.get(name) {
            rx_total += curr_rx.saturating_sub(*prev_rx);
            tx_total += curr_tx.saturating_sub(*prev_tx);
        }
    }
    ((rx_total as f64 / secs) as u64, (tx_total as f64 / secs) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(entries: &[(&str, u64, u64)]) -> NetSnapshot {
        entries
            .iter()
            .map(|(n, r, t)| (n.to_string(), (*r, *t)))
            .collect()
    }

    #[test]
    fn network_rates_sum_known_interfaces() {
        let prev = snap(&[("eth0", 1000, 500), ("lo", 0, 0)]);
        let curr = snap(&[("eth0", 3000, 1500), ("lo", 400, 400), ("wlan0", 9999, 9999)]);
        assert_eq!(network_rates(&prev, &curr, 2.0), (1200, 700));
    }

    #[test]
    fn network_rates_handle_counter_reset_and_zero_duration() {
        let prev = snap(&[("eth0", 5000, 5000)]);
        let curr = snap(&[("eth0", 100, 100)]);
        assert_eq!(network_rates(&prev, &curr, 1.0), (0, 0));
        assert_eq!(network_rates(&prev, &prev, 0.0), (0, 0));
    }

    #[test]
    fn percent_guards_empty_totals() {
        assert_eq!(percent(5, 0), 0.0);
        assert_eq!(percent(50, 200), 25.0);
    }

    #[test]
    fn sample_stays_in_range() {
        let mut sampler = ResourceSampler::new();
        let g = sampler.sample();
        assert!((0.0..=100.0).contains(&g.cpu_percent));
        assert!((0.0..=100.0).contains(&g.memory_percent));
        assert!((0.0..=100.0).contains(&g.disk_used_percent));
        assert_eq!((g.net_in_rate, g.net_out_rate), (0, 0));
    }
}
