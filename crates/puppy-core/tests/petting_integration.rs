//! Integration tests for petting: threshold, cooldown and streak decay,
//! and the reward reaching the pet's mood.

use chrono::{DateTime, Duration, Local, TimeZone};
use puppy_core::{
    Activity, Event, MoodTier, PetOutcome, PettingAccumulator, PettingConfig, Puppy, PuppyConfig,
};

fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2026, 6, 15, h, m, s)
        .single()
        .expect("unambiguous local time")
}

fn seeded_config(seed: u64) -> PuppyConfig {
    PuppyConfig {
        petting: PettingConfig {
            seed: Some(seed),
            ..PettingConfig::default()
        },
        ..PuppyConfig::default()
    }
}

#[test]
fn test_threshold_minus_one_then_reward_then_cooldown() {
    let mut acc = PettingAccumulator::with_config(seeded_config(7).petting).unwrap();
    let now = at(10, 0, 0);
    let threshold = acc.threshold();

    for n in 1..threshold {
        assert_eq!(
            acc.register_pet(now),
            PetOutcome::Accumulating {
                touch_count: n,
                threshold
            }
        );
    }
    assert_eq!(acc.register_pet(now), PetOutcome::Rewarded { threshold });

    let after = acc.register_pet(now + Duration::seconds(59));
    assert!(matches!(after, PetOutcome::CooldownActive { .. }));
    assert_eq!(acc.touch_count(), 0);
}

#[test]
fn test_streak_decay_draws_fresh_threshold() {
    let mut acc = PettingAccumulator::with_config(seeded_config(11).petting).unwrap();
    let start = at(10, 0, 0);
    acc.register_pet(start);

    let outcome = acc.register_pet(start + Duration::seconds(601));
    match outcome {
        PetOutcome::Accumulating {
            touch_count,
            threshold,
        } => {
            assert_eq!(touch_count, 1);
            assert!((3..=8).contains(&threshold));
        }
        other => panic!("expected accumulating, got {other:?}"),
    }
}

#[test]
fn test_petting_cheers_up_a_sad_puppy() {
    let start = at(12, 0, 0);
    let mut puppy = Puppy::with_config(start, &seeded_config(3)).unwrap();
    // Two study sessions from full: mood 5 -> 3 -> 1.
    puppy.request_activity(Activity::Idle, start).unwrap();
    puppy.request_activity(Activity::Study, start).unwrap();
    puppy.request_activity(Activity::Idle, start).unwrap();
    puppy.request_activity(Activity::Study, start).unwrap();
    assert_eq!(puppy.mood_tier(), MoodTier::Bad);
    assert_eq!(puppy.snapshot().animation().to_string(), "study_bad");

    let mut now = start;
    let mut rewards = 0;
    while puppy.mood_tier() != MoodTier::Normal {
        if puppy.register_pet(now).is_rewarded() {
            rewards += 1;
        }
        now += Duration::seconds(5);
    }
    assert_eq!(rewards, 1);
    assert_eq!(puppy.snapshot().mood.value(), 2);
    assert_eq!(puppy.snapshot().animation().to_string(), "study_normal");
    assert_eq!(puppy.activity(), Activity::Study);

    let rewarded = puppy
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, Event::PetRewarded { .. }))
        .count();
    assert_eq!(rewarded, 1);
}

#[test]
fn test_rapid_clicking_cannot_farm_rewards() {
    let start = at(12, 0, 0);
    let mut puppy = Puppy::with_config(start, &seeded_config(99)).unwrap();
    puppy.request_activity(Activity::Idle, start).unwrap();
    puppy.request_activity(Activity::Study, start).unwrap();

    // One click per second for a minute: at most one reward fits.
    let rewards = (0..60)
        .filter(|s| puppy.register_pet(start + Duration::seconds(*s)).is_rewarded())
        .count();
    assert_eq!(rewards, 1);
}
