// File: crates/grapher-core/src/grid.rs
// Summary: Tick layout helpers ("nice numbers" ticks and tick label formatting).

/// Round `range` to a 1/2/5 x 10^n value; `round` picks nearest instead of ceiling.
fn nice_number(range: f64, round: bool) -> f64 {
    let exponent = range.log10().floor();
    let fraction = range / 10f64.powf(exponent);
    let nice = if round {
        if fraction < 1.5 { 1.0 } else if fraction < 3.0 { 2.0 } else if fraction < 7.0 { 5.0 } else { 10.0 }
    } else if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * 10f64.powf(exponent)
}

/// Tick step for roughly `target` ticks across `[min, max]`.
pub fn nice_step(min: f64, max: f64, target: usize) -> f64 {
    let span = (max - min).abs();
    if !span.is_finite() || span <= f64::EPSILON {
        return 1.0;
    }
    let range = nice_number(span, false);
    nice_number(range / (target.max(2) - 1) as f64, true)
}

/// Tick values inside `[min, max]` at a nice step.
pub fn nice_ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    if !min.is_finite() || !max.is_finite() || max <= min {
        return vec![min];
    }
    let step = nice_step(min, max, target);
    let first = (min / step).ceil() * step;
    let mut ticks = Vec::new();
    let mut k = 0usize;
    loop {
        let v = first + step * k as f64;
        // tolerate float drift at the top edge
        if v > max + step * 1e-9 { break; }
        // snap -0.0 and 1e-17 style noise to zero
        ticks.push(if v.abs() < step * 1e-9 { 0.0 } else { v });
        k += 1;
        if k > 1000 { break; }
    }
    ticks
}

/// Format a tick with just enough decimals for `step`.
pub fn format_tick(value: f64, step: f64) -> String {
    let abs = value.abs();
    if abs != 0.0 && (abs >= 1e6 || abs < 1e-4) {
        return format!("{value:.1e}");
    }
    let decimals = if step >= 1.0 || step <= 0.0 {
        0
    } else {
        (-step.log10().floor()) as usize
    };
    format!("{value:.decimals$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_cover_unit_range() {
        let t = nice_ticks(0.0, 1.0, 6);
        assert_eq!(t.first().copied(), Some(0.0));
        assert!((t.last().copied().unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(t.len(), 6);
    }

    #[test]
    fn ticks_stay_inside_range() {
        let t = nice_ticks(-3.7, 12.2, 6);
        assert!(t.iter().all(|&v| (-3.7..=12.2).contains(&v)));
        assert!(t.len() >= 3);
    }

    #[test]
    fn tick_labels_use_step_precision() {
        assert_eq!(format_tick(2.0, 1.0), "2");
        assert_eq!(format_tick(0.25, 0.05), "0.25");
        assert_eq!(format_tick(0.0, 0.2), "0.0");
    }
}
