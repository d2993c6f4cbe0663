//! Data-driven maintainability scores from the static metrics.
//!
//! These feed reporting only; nothing here influences the complexity
//! estimate.

use crate::core::StaticMetrics;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scores {
    /// 40..=100, higher is better.
    pub quality: u32,
    /// 0..=100 estimated refactoring pressure.
    pub refactor_percentage: u32,
    /// 0..=100 estimated optimization headroom.
    pub optimization_percentage: u32,
}

pub fn score(metrics: &StaticMetrics) -> Scores {
    Scores {
        quality: quality_score(metrics),
        refactor_percentage: refactor_percentage(metrics),
        optimization_percentage: optimization_percentage(metrics),
    }
}

fn quality_score(m: &StaticMetrics) -> u32 {
    let mut base: i64 = 100;
    base -= m.cyclomatic_complexity as i64 * 4;
    base -= m.max_loop_depth as i64 * 6;
    base -= m.dynamic_allocations as i64 * 3;
    if m.multi_recursion {
        base -= 15;
    } else if m.has_recursion {
        base -= 8;
    }
    base.max(40) as u32
}

fn refactor_percentage(m: &StaticMetrics) -> u32 {
    let funcs = m.function_count.max(1) as f64;
    let avg_func_size = m.lines_of_code as f64 / funcs;

    let mut penalty = (avg_func_size - 25.0).max(0.0) * 0.8;
    penalty += m.cyclomatic_complexity as f64 * 2.0;
    penalty += m.max_loop_depth as f64 * 5.0;
    if m.multi_recursion {
        penalty += 15.0;
    } else if m.has_recursion {
        penalty += 8.0;
    }
    (penalty as u32).min(100)
}

fn optimization_percentage(m: &StaticMetrics) -> u32 {
    let mut potential = m.max_loop_depth * 10;
    potential += m.dynamic_allocations as u32 * 5;
    potential += m.conditional_count as u32;
    if m.multi_recursion {
        potential += 20;
    } else if m.has_recursion {
        potential += 10;
    }
    potential.min(100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Language;

    #[test]
    fn trivial_snippet_scores_clean() {
        let m = StaticMetrics::empty(Language::Generic);
        let s = score(&m);
        assert_eq!(s.quality, 96);
        assert_eq!(s.refactor_percentage, 2);
        assert_eq!(s.optimization_percentage, 0);
    }

    #[test]
    fn deep_nesting_and_branching_drag_quality_down() {
        let mut m = StaticMetrics::empty(Language::Generic);
        m.cyclomatic_complexity = 12;
        m.max_loop_depth = 3;
        m.dynamic_allocations = 4;
        m.multi_recursion = true;
        m.has_recursion = true;
        let s = score(&m);
        assert_eq!(s.quality, 40);
        assert_eq!(s.refactor_percentage, 54);
        assert_eq!(s.optimization_percentage, 70);
    }

    #[test]
    fn scores_stay_in_bounds() {
        let mut m = StaticMetrics::empty(Language::Generic);
        m.cyclomatic_complexity = 500;
        m.max_loop_depth = 50;
        m.dynamic_allocations = 200;
        m.lines_of_code = 10_000;
        m.function_count = 1;
        let s = score(&m);
        assert_eq!(s.quality, 40);
        assert_eq!(s.refactor_percentage, 100);
        assert_eq!(s.optimization_percentage, 100);
    }
}
