use super::*;

use shared::domain::BOX_COUNT;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn lifecycle_only(transitions: &[Transition]) -> Vec<(LifecycleState, u64)> {
    let mut seen = Vec::new();
    let mut last = None;
    for transition in transitions {
        if last != Some(transition.state) {
            seen.push((transition.state, transition.at.as_millis() as u64));
            last = Some(transition.state);
        }
    }
    seen
}

#[test]
fn every_box_starts_idle() {
    let controller = LifecycleController::new();
    assert_eq!(controller.box_ids().count(), BOX_COUNT);
    for box_id in controller.box_ids() {
        assert_eq!(controller.state(box_id), Some(LifecycleState::Idle));
        assert_eq!(controller.stage(box_id), Some(0));
    }
    assert_eq!(controller.next_deadline(), None);
}

#[test]
fn trigger_walks_the_documented_timeline() {
    let mut controller = LifecycleController::new();
    let box_id = BoxId(0);

    let started = controller.trigger(box_id, ms(0)).expect("trigger");
    assert_eq!(started.len(), 1);
    assert_eq!(controller.state(box_id), Some(LifecycleState::Anticipation));

    controller.advance(ms(600));
    assert_eq!(controller.state(box_id), Some(LifecycleState::Opening));

    controller.advance(ms(2100));
    assert_eq!(controller.state(box_id), Some(LifecycleState::Revealing));
    assert_eq!(controller.reward(box_id), Some("🏆 Legendary Sword"));

    controller.advance(ms(3600));
    assert_eq!(controller.state(box_id), Some(LifecycleState::Claimed));

    controller.advance(ms(6600));
    assert_eq!(controller.state(box_id), Some(LifecycleState::Idle));
    assert_eq!(controller.next_deadline(), None);
}

#[test]
fn transitions_land_exactly_on_deadlines() {
    let mut controller = LifecycleController::new();
    let box_id = BoxId(4);
    let mut transitions = controller.trigger(box_id, ms(0)).expect("trigger");

    while let Some(deadline) = controller.next_deadline() {
        assert_eq!(controller.advance(deadline - ms(1)), Vec::new());
        transitions.extend(controller.advance(deadline));
    }

    assert_eq!(
        lifecycle_only(&transitions),
        vec![
            (LifecycleState::Anticipation, 0),
            (LifecycleState::Opening, 500),
            (LifecycleState::Revealing, 2000),
            (LifecycleState::Claimed, 3500),
            (LifecycleState::Idle, 6500),
        ]
    );
}

#[test]
fn large_jump_reports_every_passed_step() {
    let mut controller = LifecycleController::new();
    controller.trigger(BoxId(1), ms(0)).expect("trigger");

    let applied = controller.advance(ms(10_000));
    let states: Vec<_> = lifecycle_only(&applied)
        .into_iter()
        .map(|(state, _)| state)
        .collect();
    assert_eq!(
        states,
        vec![
            LifecycleState::Opening,
            LifecycleState::Revealing,
            LifecycleState::Claimed,
            LifecycleState::Idle,
        ]
    );
    assert!(applied.windows(2).all(|w| w[0].at <= w[1].at));
}

#[test]
fn unlock_stage_advances_during_opening() {
    let mut controller = LifecycleController::new();
    let box_id = BoxId(5);
    controller.trigger(box_id, ms(0)).expect("trigger");

    controller.advance(ms(500));
    assert_eq!(controller.stage(box_id), Some(0));
    controller.advance(ms(900));
    assert_eq!(controller.stage(box_id), Some(1));
    controller.advance(ms(1300));
    assert_eq!(controller.stage(box_id), Some(2));
    controller.advance(ms(1700));
    assert_eq!(controller.stage(box_id), Some(3));
    assert_eq!(controller.state(box_id), Some(LifecycleState::Opening));

    controller.advance(ms(6500));
    assert_eq!(controller.stage(box_id), Some(0));
}

#[test]
fn boxes_run_independently() {
    let mut controller = LifecycleController::new();
    controller.trigger(BoxId(0), ms(0)).expect("trigger 0");
    controller.trigger(BoxId(3), ms(1000)).expect("trigger 3");

    controller.advance(ms(1200));
    assert_eq!(controller.state(BoxId(0)), Some(LifecycleState::Opening));
    assert_eq!(controller.state(BoxId(3)), Some(LifecycleState::Anticipation));

    controller.advance(ms(3100));
    assert_eq!(controller.state(BoxId(0)), Some(LifecycleState::Revealing));
    assert_eq!(controller.state(BoxId(3)), Some(LifecycleState::Revealing));

    controller.advance(ms(6600));
    assert_eq!(controller.state(BoxId(0)), Some(LifecycleState::Idle));
    assert_eq!(controller.state(BoxId(3)), Some(LifecycleState::Claimed));

    controller.advance(ms(7500));
    assert_eq!(controller.state(BoxId(3)), Some(LifecycleState::Idle));
    for untouched in [1, 2, 4, 5, 6, 7] {
        assert_eq!(
            controller.state(BoxId(untouched)),
            Some(LifecycleState::Idle)
        );
    }
}

#[test]
fn second_cycle_repeats_the_first() {
    let mut controller = LifecycleController::new();
    let box_id = BoxId(2);

    let mut first = controller.trigger(box_id, ms(0)).expect("first");
    first.extend(controller.advance(ms(6500)));

    let mut second = controller.trigger(box_id, ms(10_000)).expect("second");
    second.extend(controller.advance(ms(16_500)));

    let shifted: Vec<_> = second
        .iter()
        .map(|t| Transition {
            at: t.at - ms(10_000),
            ..*t
        })
        .collect();
    assert_eq!(first, shifted);
}

#[test]
fn trigger_mid_sequence_is_rejected_without_disturbing_timing() {
    let mut controller = LifecycleController::new();
    let box_id = BoxId(6);
    controller.trigger(box_id, ms(0)).expect("trigger");
    controller.advance(ms(700));

    let err = controller
        .trigger(box_id, ms(800))
        .expect_err("opening box must reject trigger");
    assert_eq!(
        err,
        LifecycleError::SequenceInFlight {
            box_id,
            state: LifecycleState::Opening,
        }
    );

    controller.advance(ms(2000));
    assert_eq!(controller.state(box_id), Some(LifecycleState::Revealing));
    controller.advance(ms(6500));
    assert_eq!(controller.state(box_id), Some(LifecycleState::Idle));
}

#[test]
fn trigger_catches_up_before_checking_state() {
    let mut controller = LifecycleController::new();
    let box_id = BoxId(0);
    controller.trigger(box_id, ms(0)).expect("trigger");

    let applied = controller.trigger(box_id, ms(7000)).expect("retrigger");
    assert_eq!(
        applied.last().map(|t| t.state),
        Some(LifecycleState::Anticipation)
    );
    assert!(applied
        .iter()
        .any(|t| t.state == LifecycleState::Idle && t.at == ms(6500)));
}

#[test]
fn trigger_from_claimed_supersedes_pending_reset() {
    let mut controller = LifecycleController::new();
    let box_id = BoxId(7);
    controller.trigger(box_id, ms(0)).expect("trigger");
    controller.advance(ms(4000));
    assert_eq!(controller.state(box_id), Some(LifecycleState::Claimed));

    controller.trigger(box_id, ms(4000)).expect("trigger from claimed");

    // The first run's reset at 6500 must not fire into the new run.
    controller.advance(ms(6600));
    assert_eq!(controller.state(box_id), Some(LifecycleState::Revealing));
    controller.advance(ms(10_500));
    assert_eq!(controller.state(box_id), Some(LifecycleState::Idle));
}

#[test]
fn unknown_box_is_rejected() {
    let mut controller = LifecycleController::new();
    assert_eq!(
        controller.trigger(BoxId(42), ms(0)),
        Err(LifecycleError::UnknownBox(BoxId(42)))
    );
    assert_eq!(controller.state(BoxId(42)), None);
    assert_eq!(controller.snapshot(BoxId(42)), None);
}

#[test]
fn snapshot_carries_variant_and_reward() {
    let controller = LifecycleController::new();
    let snapshot = controller.snapshot(BoxId(5)).expect("snapshot");
    assert_eq!(snapshot.variant, BoxVariant::MultiStage);
    assert_eq!(snapshot.reward, "🔮 Rare Artifact");
    assert_eq!(controller.snapshots().len(), BOX_COUNT);
}
