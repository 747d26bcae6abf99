//! Per-process memory readings
//!
//! Linux reports resident pages in `/proc/<pid>/statm`; Windows reports
//! the working set through GetProcessMemoryInfo.

/// Per-process memory statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryInfo {
    /// Resident set size in bytes (physical memory used)
    pub rss_bytes: u64,
}

impl MemoryInfo {
    /// Builds a reading from a resident page count.
    #[cfg_attr(not(target_os = "linux"), allow(dead_code))]
    pub fn from_pages(resident_pages: u64, page_size: u64) -> Self {
        Self {
            rss_bytes: resident_pages.saturating_mul(page_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pages() {
        assert_eq!(MemoryInfo::from_pages(1034, 4096).rss_bytes, 1034 * 4096);
        assert_eq!(MemoryInfo::from_pages(0, 4096), MemoryInfo::default());
    }

    #[test]
    fn test_from_pages_saturates() {
        assert_eq!(MemoryInfo::from_pages(u64::MAX, 4096).rss_bytes, u64::MAX);
    }
}
