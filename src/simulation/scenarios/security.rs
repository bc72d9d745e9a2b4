use crate::simulation::geo::pick_landmark_pair;
use crate::simulation::pools::{self, PRIVATE_IPS, PUBLIC_IPS};
use crate::simulation::scenarios::traffic::create_event;
use crate::simulation::scenarios::{Scenario, ScenarioKind, ScenarioPlan, pacing};
use crate::simulation::types::{EventType, ScenarioContext};
use rand::RngCore;

// --- 1. Bruteforce: failed logins hammering from one source ---
pub struct Bruteforce {
    pub count: usize,
    pub delay: f64,
}

impl Scenario for Bruteforce {
    fn kind(&self) -> ScenarioKind {
        ScenarioKind::Bruteforce
    }

    fn headline(&self) -> String {
        format!("Testing Bruteforce Scenario: {} failed logins", self.count)
    }

    fn plan(&self, user_id: u64, rng: &mut dyn RngCore) -> ScenarioPlan {
        let attack_ip = pools::pick(PUBLIC_IPS, rng).to_string();

        let events = (0..self.count)
            .map(|_| {
                create_event(
                    rng,
                    EventType::LoginFailed,
                    &attack_ip,
                    user_id,
                    None,
                    format!("Failed login from {}", attack_ip),
                )
            })
            .collect();

        ScenarioPlan {
            events,
            pacing: pacing(self.delay),
            context: ScenarioContext::Bruteforce { attack_ip },
        }
    }
}

// --- 2. Distributed Access: one identity, many network origins ---
pub struct DistributedAccess {
    pub ip_count: usize,
    /// Reported only; every login is for the configured test user.
    pub users: usize,
    pub delay: f64,
}

impl Scenario for DistributedAccess {
    fn kind(&self) -> ScenarioKind {
        ScenarioKind::Distributed
    }

    fn headline(&self) -> String {
        format!(
            "Testing Distributed Access Scenario: User from {} IPs",
            self.ip_count
        )
    }

    fn plan(&self, user_id: u64, rng: &mut dyn RngCore) -> ScenarioPlan {
        let ips = pools::sample(PUBLIC_IPS, self.ip_count, rng);

        let events = ips
            .iter()
            .map(|ip| {
                create_event(
                    rng,
                    EventType::LoginSuccess,
                    ip,
                    user_id,
                    None,
                    format!("Login from {}", ip),
                )
            })
            .collect();

        ScenarioPlan {
            events,
            pacing: pacing(self.delay),
            context: ScenarioContext::Distributed {
                user_id,
                users_requested: self.users,
                ips_used: ips.len(),
                ips,
            },
        }
    }
}

// --- 3. Unusual Login: impossible travel between two landmarks ---
pub struct UnusualLogin {
    pub distance_km: u32,
    pub delay: f64,
}

impl Scenario for UnusualLogin {
    fn kind(&self) -> ScenarioKind {
        ScenarioKind::UnusualLogin
    }

    fn headline(&self) -> String {
        format!(
            "Testing Unusual Login Scenario: Login from {}km away",
            self.distance_km
        )
    }

    fn plan(&self, user_id: u64, rng: &mut dyn RngCore) -> ScenarioPlan {
        let (home, away, actual_km) = pick_landmark_pair(f64::from(self.distance_km), rng);

        let home_ip = pools::pick(PRIVATE_IPS.as_slice(), rng).to_string();
        let away_ip = pools::pick(PUBLIC_IPS, rng).to_string();

        let events = vec![
            create_event(
                rng,
                EventType::LoginSuccess,
                &home_ip,
                user_id,
                Some(home.geo),
                format!("Normal login from {} {}", home.name, home.geo),
            ),
            create_event(
                rng,
                EventType::LoginSuccess,
                &away_ip,
                user_id,
                Some(away.geo),
                format!("Unusual login from {} {}", away.name, away.geo),
            ),
        ];

        ScenarioPlan {
            events,
            pacing: pacing(self.delay),
            context: ScenarioContext::UnusualLogin {
                from_location: home.geo,
                to_location: away.geo,
                from_name: home.name.to_string(),
                to_name: away.name.to_string(),
                requested_distance_km: f64::from(self.distance_km),
                actual_distance_km: actual_km,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::types::Severity;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn test_bruteforce_plan() {
        let mut rng = StdRng::seed_from_u64(42);
        let plan = Bruteforce {
            count: 10,
            delay: 0.1,
        }
        .plan(1, &mut rng);

        assert_eq!(plan.events.len(), 10);
        let ScenarioContext::Bruteforce { attack_ip } = &plan.context else {
            panic!("wrong context: {:?}", plan.context);
        };
        assert!(PUBLIC_IPS.contains(&attack_ip.as_str()));
        for event in &plan.events {
            assert_eq!(event.event_type, EventType::LoginFailed);
            assert_eq!(event.event_type.severity(), Severity::High);
            assert_eq!(&event.ip_address, attack_ip);
            assert_eq!(event.user_id, 1);
        }
    }

    #[test]
    fn test_distributed_plan_uses_distinct_ips() {
        let mut rng = StdRng::seed_from_u64(42);
        let plan = DistributedAccess {
            ip_count: 8,
            users: 3,
            delay: 0.0,
        }
        .plan(7, &mut rng);

        assert_eq!(plan.events.len(), 8);
        let ips: HashSet<_> = plan.events.iter().map(|e| e.ip_address.clone()).collect();
        assert_eq!(ips.len(), 8);
        assert!(plan.events.iter().all(|e| e.event_type == EventType::LoginSuccess));
        assert!(plan.events.iter().all(|e| e.user_id == 7));
    }

    #[test]
    fn test_distributed_plan_caps_at_pool_size() {
        let mut rng = StdRng::seed_from_u64(9);
        let plan = DistributedAccess {
            ip_count: 50,
            users: 3,
            delay: 0.0,
        }
        .plan(1, &mut rng);

        assert_eq!(plan.events.len(), PUBLIC_IPS.len());
        match plan.context {
            ScenarioContext::Distributed { ips_used, .. } => {
                assert_eq!(ips_used, PUBLIC_IPS.len())
            }
            other => panic!("wrong context: {:?}", other),
        }
    }

    #[test]
    fn test_unusual_plan_differs_in_location() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..25 {
            let plan = UnusualLogin {
                distance_km: 1000,
                delay: 0.0,
            }
            .plan(1, &mut rng);

            assert_eq!(plan.events.len(), 2);
            let (first, second) = (&plan.events[0], &plan.events[1]);
            assert_ne!(first.geo, second.geo);
            assert!(first.ip_address.starts_with("192.168.1."));
            assert!(PUBLIC_IPS.contains(&second.ip_address.as_str()));
            assert!(plan.events.iter().all(|e| e.event_type == EventType::LoginSuccess));
        }
    }

    #[test]
    fn test_seeded_plans_are_deterministic() {
        let scenario = Bruteforce {
            count: 5,
            delay: 0.0,
        };
        let a = scenario.plan(1, &mut StdRng::seed_from_u64(99));
        let b = scenario.plan(1, &mut StdRng::seed_from_u64(99));
        assert_eq!(a.events, b.events);
    }
}
