//! Worker-pool sizing.
//!
//! Pure tiered mapping from CPU count to a bounded worker count. The work
//! is network-bound, so the pool runs wider than the CPU count on small
//! machines and is capped hard on large ones.

use crate::defaults;

/// Compute the worker count for a given CPU count.
///
/// Tiers:
/// - ≤2 CPUs  → min(4, cpu×2)
/// - 3–4 CPUs → min(8, cpu×2)
/// - 5–8 CPUs → min(16, cpu×2)
/// - >8 CPUs  → min(20, max(16, cpu×3/2))
///
/// The result is clamped to a minimum of 2. The `max(16, …)` floor on the
/// top tier keeps the mapping non-decreasing across the 8→9 boundary,
/// where a bare `cpu×1.5` would dip below the 5–8 tier's ceiling.
///
/// Deterministic: no I/O, no randomness.
pub fn optimal_workers(cpu_count: usize) -> usize {
    let sized = match cpu_count {
        0..=2 => (cpu_count * 2).min(4),
        3..=4 => (cpu_count * 2).min(8),
        5..=8 => (cpu_count * 2).min(16),
        _ => (cpu_count * 3 / 2).max(16).min(defaults::MAX_WORKERS),
    };
    sized.max(defaults::MIN_WORKERS)
}

/// Worker count for this host's detected parallelism.
///
/// Falls back to a fixed CPU count when detection fails.
pub fn detected_workers() -> usize {
    let cpu_count = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(defaults::FALLBACK_CPU_COUNT);
    optimal_workers(cpu_count)
}
