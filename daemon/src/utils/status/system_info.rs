use paperdash_protocol::status::{CpuInfo, RamInfo};
use sysinfo::{Cpu, CpuRefreshKind, RefreshKind, System};

pub fn get_ram_info() -> RamInfo {
    let mut sys = System::new();
    sys.refresh_memory();

    RamInfo::new(sys.total_memory(), sys.available_memory())
}

pub fn get_cpu_info() -> CpuInfo {
    let system =
        System::new_with_specifics(RefreshKind::nothing().with_cpu(CpuRefreshKind::everything()));

    let cpus: Vec<&Cpu> = system.cpus().iter().collect();
    let (model, speed) = match cpus.first() {
        Some(cpu) => (cpu.brand().trim().to_string(), cpu.frequency()),
        None => ("Unknown CPU".to_string(), 0),
    };

    CpuInfo {
        model: if model.is_empty() {
            "Unknown CPU".to_string()
        } else {
            model
        },
        cores: cpus.len() as u32,
        speed: format!("{} MHz", speed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_ram_info() {
        let ram = get_ram_info();
        assert!(ram.total > 0);
        assert!(ram.available <= ram.total);
        assert!(ram.usage_percent >= 0.0 && ram.usage_percent <= 100.0);
    }

    #[test]
    fn test_get_cpu_info() {
        let cpu = get_cpu_info();
        assert!(!cpu.model.is_empty());
        assert!(cpu.cores > 0);
        assert!(cpu.speed.ends_with(" MHz"));
    }
}
