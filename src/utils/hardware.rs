use sysinfo::System;

#[derive(Debug, Clone, Copy)]
pub struct HardwareInfo {
    pub cpu_cores: u64,
    pub total_mem_mib: u64,
    pub free_mem_mib: u64,
}

pub fn get_hardware_info() -> HardwareInfo {
    let mut sys = System::new_all();
    sys.refresh_all();

    HardwareInfo {
        cpu_cores: sys.cpus().len() as u64,
        total_mem_mib: sys.total_memory() / 1024 / 1024,
        free_mem_mib: sys.available_memory() / 1024 / 1024,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_reports_at_least_one_core() {
        let info = get_hardware_info();
        assert!(info.cpu_cores >= 1);
        assert!(info.total_mem_mib > 0);
        assert!(info.free_mem_mib <= info.total_mem_mib);
    }
}
