use crate::simulation::pools::{self, PUBLIC_IPS};
use crate::simulation::scenarios::{Scenario, ScenarioKind, ScenarioPlan, pacing};
use crate::simulation::types::{EventType, Geo, PlannedEvent, ScenarioContext};
use rand::seq::IndexedRandom;
use rand::{Rng, RngCore};

/// Only every Nth delivered event of a burst is echoed to the console.
pub const ECHO_EVERY: usize = 10;

/// Build a planned event. A random user agent and a random point on the
/// globe are drawn when none is given.
pub fn create_event<R: Rng + ?Sized>(
    rng: &mut R,
    event_type: EventType,
    ip_address: &str,
    user_id: u64,
    geo: Option<Geo>,
    note: String,
) -> PlannedEvent {
    PlannedEvent {
        event_type,
        ip_address: ip_address.to_string(),
        user_id,
        user_agent: pools::user_agent(rng),
        geo: geo.unwrap_or_else(|| pools::random_geo(rng)),
        note,
        echo: true,
    }
}

// --- High-Frequency Burst ---
pub struct HighFrequency {
    pub event_count: usize,
    pub delay: f64,
}

impl Scenario for HighFrequency {
    fn kind(&self) -> ScenarioKind {
        ScenarioKind::HighFrequency
    }

    fn headline(&self) -> String {
        format!(
            "Testing High-Frequency Scenario: {} events from same IP",
            self.event_count
        )
    }

    fn plan(&self, user_id: u64, rng: &mut dyn RngCore) -> ScenarioPlan {
        let attack_ip = pools::pick(PUBLIC_IPS, rng).to_string();

        let events = (0..self.event_count)
            .map(|i| {
                let event_type = *EventType::ALL.choose(rng).unwrap_or(&EventType::LoginSuccess);
                let mut event = create_event(
                    rng,
                    event_type,
                    &attack_ip,
                    user_id,
                    None,
                    format!("{} from {}", event_type, attack_ip),
                );
                event.echo = i % ECHO_EVERY == 0;
                event
            })
            .collect();

        ScenarioPlan {
            events,
            pacing: pacing(self.delay),
            context: ScenarioContext::HighFrequency { attack_ip },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn test_burst_from_single_ip() {
        let mut rng = StdRng::seed_from_u64(42);
        let plan = HighFrequency {
            event_count: 200,
            delay: 0.05,
        }
        .plan(1, &mut rng);

        assert_eq!(plan.events.len(), 200);
        let ips: HashSet<_> = plan.events.iter().map(|e| e.ip_address.as_str()).collect();
        assert_eq!(ips.len(), 1);
        assert!(PUBLIC_IPS.contains(ips.iter().next().unwrap()));

        // 200 uniform draws over 4 types will hit all of them
        let types: HashSet<_> = plan.events.iter().map(|e| e.event_type).collect();
        assert_eq!(types.len(), EventType::ALL.len());
    }

    #[test]
    fn test_echo_every_tenth() {
        let mut rng = StdRng::seed_from_u64(1);
        let plan = HighFrequency {
            event_count: 25,
            delay: 0.0,
        }
        .plan(1, &mut rng);

        let echoed: Vec<_> = plan
            .events
            .iter()
            .enumerate()
            .filter(|(_, e)| e.echo)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(echoed, vec![0, 10, 20]);
    }

    #[test]
    fn test_zero_events() {
        let mut rng = StdRng::seed_from_u64(1);
        let plan = HighFrequency {
            event_count: 0,
            delay: 0.0,
        }
        .plan(1, &mut rng);
        assert!(plan.events.is_empty());
    }
}
