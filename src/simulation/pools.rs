//! Read-only data pools that scenarios draw from.

use crate::simulation::types::Geo;
use once_cell::sync::Lazy;
use rand::Rng;
use rand::seq::IndexedRandom;

pub const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 14_7_1 like Mac OS X) AppleWebKit/605.1.15",
    "Mozilla/5.0 (Android 11; Mobile; rv:68.0) Gecko/68.0 Firefox/88.0",
];

/// Documentation ranges (RFC 5737) plus a handful of 10/8 addresses.
pub const PUBLIC_IPS: &[&str] = &[
    "203.0.113.1",
    "203.0.113.2",
    "203.0.113.3",
    "203.0.113.4",
    "203.0.113.5",
    "198.51.100.1",
    "198.51.100.2",
    "198.51.100.3",
    "198.51.100.4",
    "198.51.100.5",
    "10.0.0.1",
    "10.0.0.2",
    "10.0.0.3",
    "10.0.0.4",
    "10.0.0.5",
];

/// 192.168.1.1 ..= 192.168.1.254
pub static PRIVATE_IPS: Lazy<Vec<String>> =
    Lazy::new(|| (1..255).map(|i| format!("192.168.1.{}", i)).collect());

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmark {
    pub name: &'static str,
    pub geo: Geo,
}

pub const LANDMARKS: &[Landmark] = &[
    Landmark { name: "New York", geo: Geo(40.7128, -74.0060) },
    Landmark { name: "Los Angeles", geo: Geo(34.0522, -118.2437) },
    Landmark { name: "London", geo: Geo(51.5074, -0.1278) },
    Landmark { name: "Paris", geo: Geo(48.8566, 2.3522) },
    Landmark { name: "Tokyo", geo: Geo(35.6762, 139.6503) },
    Landmark { name: "Sydney", geo: Geo(-33.8688, 151.2093) },
    Landmark { name: "Sao Paulo", geo: Geo(-23.5505, -46.6333) },
    Landmark { name: "Moscow", geo: Geo(55.7558, 37.6176) },
    Landmark { name: "Beijing", geo: Geo(39.9042, 116.4074) },
    Landmark { name: "New Delhi", geo: Geo(28.6139, 77.2090) },
];

/// Uniform pick from a pool. Empty pools yield "".
pub fn pick<'a, T, R>(pool: &'a [T], rng: &mut R) -> &'a str
where
    T: AsRef<str>,
    R: Rng + ?Sized,
{
    pool.choose(rng).map(AsRef::as_ref).unwrap_or_default()
}

/// `amount` distinct entries without replacement, capped at the pool size.
pub fn sample<T, R>(pool: &[T], amount: usize, rng: &mut R) -> Vec<String>
where
    T: AsRef<str>,
    R: Rng + ?Sized,
{
    pool.choose_multiple(rng, amount.min(pool.len()))
        .map(|ip| ip.as_ref().to_string())
        .collect()
}

pub fn user_agent<R: Rng + ?Sized>(rng: &mut R) -> String {
    pick(USER_AGENTS, rng).to_string()
}

/// Uniformly random point anywhere on the globe.
pub fn random_geo<R: Rng + ?Sized>(rng: &mut R) -> Geo {
    Geo(rng.random_range(-90.0..=90.0), rng.random_range(-180.0..=180.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn test_private_pool_bounds() {
        assert_eq!(PRIVATE_IPS.len(), 254);
        assert_eq!(PRIVATE_IPS[0], "192.168.1.1");
        assert_eq!(PRIVATE_IPS[253], "192.168.1.254");
    }

    #[test]
    fn test_sample_is_distinct_and_capped() {
        let mut rng = StdRng::seed_from_u64(7);

        let ips = sample(PUBLIC_IPS, 8, &mut rng);
        assert_eq!(ips.len(), 8);
        assert_eq!(ips.iter().collect::<HashSet<_>>().len(), 8);

        let all = sample(PUBLIC_IPS, 100, &mut rng);
        assert_eq!(all.len(), PUBLIC_IPS.len());
        assert_eq!(all.iter().collect::<HashSet<_>>().len(), PUBLIC_IPS.len());
    }

    #[test]
    fn test_pick_from_pools() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(PUBLIC_IPS.contains(&pick(PUBLIC_IPS, &mut rng)));
        let private = pick(PRIVATE_IPS.as_slice(), &mut rng);
        assert!(PRIVATE_IPS.iter().any(|ip| ip == private));
        assert!(USER_AGENTS.contains(&user_agent(&mut rng).as_str()));

        let empty: &[&str] = &[];
        assert_eq!(pick(empty, &mut rng), "");
    }

    #[test]
    fn test_random_geo_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let geo = random_geo(&mut rng);
            assert!((-90.0..=90.0).contains(&geo.lat()));
            assert!((-180.0..=180.0).contains(&geo.lon()));
        }
    }

    #[test]
    fn test_landmarks_are_distinct() {
        let coords: HashSet<String> = LANDMARKS.iter().map(|l| l.geo.to_string()).collect();
        assert_eq!(coords.len(), LANDMARKS.len());
    }
}
