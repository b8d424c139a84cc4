//! Kubernetes quantity parsing
//!
//! Converts quantity strings such as `250m`, `1.5`, `128Mi` or `1e3` into
//! plain numbers so the engine can work with `f64` values.

use k8s_openapi::apimachinery::pkg::api::resource::Quantity;

const MIB: f64 = 1024.0 * 1024.0;

/// Parse a quantity string into its base-unit value
pub fn parse_quantity(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let split = raw
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '+' || c == '-'))
        .unwrap_or(raw.len());
    let (number, suffix) = raw.split_at(split);
    let value: f64 = number.parse().ok()?;

    // (multiplier, divisor); sub-unit suffixes divide to keep `250m` exact
    let (multiplier, divisor) = match suffix {
        "" => (1.0, 1.0),
        "n" => (1.0, 1e9),
        "u" => (1.0, 1e6),
        "m" => (1.0, 1e3),
        "k" => (1e3, 1.0),
        "M" => (1e6, 1.0),
        "G" => (1e9, 1.0),
        "T" => (1e12, 1.0),
        "P" => (1e15, 1.0),
        "E" => (1e18, 1.0),
        "Ki" => (1024.0, 1.0),
        "Mi" => (MIB, 1.0),
        "Gi" => (1024.0 * MIB, 1.0),
        "Ti" => (1024.0 * 1024.0 * MIB, 1.0),
        "Pi" => (1024.0 * 1024.0 * 1024.0 * MIB, 1.0),
        "Ei" => (1024.0 * 1024.0 * 1024.0 * 1024.0 * MIB, 1.0),
        exp if exp.starts_with(['e', 'E']) => (10f64.powi(exp[1..].parse::<i32>().ok()?), 1.0),
        _ => return None,
    };

    let parsed = value * multiplier / divisor;
    parsed.is_finite().then_some(parsed)
}

/// CPU quantity in cores; unparseable values count as zero
pub fn cpu_cores(quantity: Option<&Quantity>) -> f64 {
    quantity.map(|q| parse_or_zero(&q.0)).unwrap_or(0.0)
}

/// Memory quantity in MiB; unparseable values count as zero
pub fn memory_mib(quantity: Option<&Quantity>) -> f64 {
    quantity.map(|q| parse_or_zero(&q.0) / MIB).unwrap_or(0.0)
}

fn parse_or_zero(raw: &str) -> f64 {
    parse_quantity(raw).unwrap_or_else(|| {
        tracing::debug!(quantity = %raw, "Unparseable quantity, treating as zero");
        0.0
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(s: &str) -> Quantity {
        Quantity(s.to_string())
    }

    #[test]
    fn test_cpu_quantities() {
        assert_eq!(cpu_cores(Some(&q("250m"))), 0.25);
        assert_eq!(cpu_cores(Some(&q("2"))), 2.0);
        assert_eq!(cpu_cores(Some(&q("1.5"))), 1.5);
        assert!((cpu_cores(Some(&q("12345678n"))) - 0.012345678).abs() < 1e-12);
        assert!((cpu_cores(Some(&q("500u"))) - 0.0005).abs() < 1e-12);
    }

    #[test]
    fn test_memory_quantities() {
        assert_eq!(memory_mib(Some(&q("128Mi"))), 128.0);
        assert_eq!(memory_mib(Some(&q("1Gi"))), 1024.0);
        assert_eq!(memory_mib(Some(&q("512Ki"))), 0.5);
        assert_eq!(memory_mib(Some(&q("1048576"))), 1.0);
        assert!((memory_mib(Some(&q("1G"))) - 953.674316).abs() < 1e-5);
    }

    #[test]
    fn test_exponent_notation() {
        assert_eq!(parse_quantity("1e3"), Some(1000.0));
        assert_eq!(parse_quantity("5E2"), Some(500.0));
    }

    #[test]
    fn test_missing_or_invalid_is_zero() {
        assert_eq!(cpu_cores(None), 0.0);
        assert_eq!(memory_mib(None), 0.0);
        assert_eq!(cpu_cores(Some(&q("lots"))), 0.0);
        assert_eq!(parse_quantity(""), None);
        assert_eq!(parse_quantity("10Xi"), None);
    }
}
