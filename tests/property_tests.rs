//! Property-based tests for transition resolution and registry semantics.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use hsm::core::{Guard, State};
use hsm::machine::{Fired, StateMachineDefinition};
use proptest::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default)]
struct Ctx {
    level: u8,
    entered: u32,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
enum Node {
    N0,
    N1,
    N2,
    N3,
}

impl State for Node {
    type Context = Ctx;

    fn name(&self) -> &str {
        match self {
            Self::N0 => "N0",
            Self::N1 => "N1",
            Self::N2 => "N2",
            Self::N3 => "N3",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Ev {
    A,
    B,
    C,
}

const NODES: [Node; 4] = [Node::N0, Node::N1, Node::N2, Node::N3];

prop_compose! {
    fn arbitrary_node()(i in 0..4usize) -> Node {
        NODES[i]
    }
}

prop_compose! {
    fn arbitrary_event()(variant in 0..3u8) -> Ev {
        match variant {
            0 => Ev::A,
            1 => Ev::B,
            _ => Ev::C,
        }
    }
}

/// One guarded candidate: fires on `event` when `level >= threshold`.
#[derive(Clone, Debug)]
struct Candidate {
    event: Ev,
    threshold: u8,
    destination: Node,
}

prop_compose! {
    fn arbitrary_candidate()(
        event in arbitrary_event(),
        threshold in 0..8u8,
        destination in arbitrary_node(),
    ) -> Candidate {
        Candidate { event, threshold, destination }
    }
}

fn machine_with(candidates: &[Candidate]) -> StateMachineDefinition<Node, Ev> {
    let mut machine = StateMachineDefinition::new("prop", Node::N0);
    let mut builder = machine.state(Node::N0);
    for c in candidates {
        let threshold = c.threshold;
        builder = builder.transition(
            c.event,
            c.destination,
            [Guard::new(move |ctx: &Ctx| ctx.level >= threshold)],
        );
    }
    builder.build().unwrap();
    for node in [Node::N1, Node::N2, Node::N3] {
        machine
            .state(node)
            .on_enter(|ctx: &mut Ctx| {
                ctx.entered += 1;
                Ok(())
            })
            .build()
            .unwrap();
    }
    machine
}

proptest! {
    #[test]
    fn dispatch_picks_first_accepting_candidate(
        candidates in prop::collection::vec(arbitrary_candidate(), 0..8),
        event in arbitrary_event(),
        level in 0..8u8,
    ) {
        let machine = machine_with(&candidates);
        let mut current = Node::N0;
        let mut ctx = Ctx { level, entered: 0 };

        let fired = machine.fire(&mut current, &event, &mut ctx).unwrap();

        let expected = candidates
            .iter()
            .find(|c| c.event == event && level >= c.threshold)
            .map(|c| c.destination);

        match expected {
            Some(destination) => {
                prop_assert_eq!(current, destination);
                prop_assert_eq!(fired, Fired::Transitioned { from: Node::N0, to: destination });
            }
            None => {
                prop_assert_eq!(current, Node::N0);
                prop_assert_eq!(fired, Fired::Unhandled);
                prop_assert_eq!(ctx.entered, 0);
            }
        }
    }

    #[test]
    fn dispatch_is_deterministic(
        candidates in prop::collection::vec(arbitrary_candidate(), 0..8),
        event in arbitrary_event(),
        level in 0..8u8,
    ) {
        let machine = machine_with(&candidates);

        let mut first = Node::N0;
        let mut second = Node::N0;
        let r1 = machine.fire(&mut first, &event, &mut Ctx { level, entered: 0 }).unwrap();
        let r2 = machine.fire(&mut second, &event, &mut Ctx { level, entered: 0 }).unwrap();

        prop_assert_eq!(first, second);
        prop_assert_eq!(r1, r2);
    }

    #[test]
    fn states_without_transitions_ignore_every_event(
        state in arbitrary_node(),
        event in arbitrary_event(),
        level in 0..8u8,
    ) {
        // N0 has no transitions here, N1..N3 only entry actions
        let machine = machine_with(&[]);
        let mut current = state;
        let mut ctx = Ctx { level, entered: 0 };

        let fired = machine.fire(&mut current, &event, &mut ctx).unwrap();

        prop_assert!(fired.is_unhandled());
        prop_assert_eq!(current, state);
        prop_assert_eq!(ctx.entered, 0);
    }

    #[test]
    fn entry_actions_run_once_per_transition(
        candidates in prop::collection::vec(arbitrary_candidate(), 1..8),
        event in arbitrary_event(),
    ) {
        let machine = machine_with(&candidates);
        let mut current = Node::N0;
        let mut ctx = Ctx { level: 7, entered: 0 };

        let fired = machine.fire(&mut current, &event, &mut ctx).unwrap();

        let expected = match fired {
            Fired::Transitioned { to, .. } if to != Node::N0 => 1,
            _ => 0,
        };
        prop_assert_eq!(ctx.entered, expected);
    }

    #[test]
    fn last_build_wins(
        first in prop::collection::vec(arbitrary_candidate(), 0..5),
        second in prop::collection::vec(arbitrary_candidate(), 0..5),
    ) {
        let mut machine = StateMachineDefinition::<Node, Ev>::new("prop", Node::N0);
        for candidates in [&first, &second] {
            let mut builder = machine.state(Node::N0);
            for c in candidates.iter() {
                builder = builder.transition(c.event, c.destination, [Guard::new(|_: &Ctx| true)]);
            }
            builder.build().unwrap();
        }

        let registered = machine.definition(&Node::N0).unwrap();
        prop_assert_eq!(registered.transitions().len(), second.len());
        for (t, c) in registered.transitions().iter().zip(second.iter()) {
            prop_assert_eq!(t.event(), &c.event);
            prop_assert_eq!(t.destination(), Some(&c.destination));
        }
    }
}
