//! Walk behavior over the trained reference maze

use std::sync::{Arc, Mutex};

use qmaze::{
    ContextBuilder, Error, Observer, Trainer, TrainingContext, Walker,
    q_learning::{LearningPhase, QTable},
};

/// Train the reference maze with its canonical hyperparameters.
fn trained_reference(seed: u64) -> (TrainingContext, QTable) {
    let mut context = ContextBuilder::reference().unwrap().seed(seed).build().unwrap();
    let table = Trainer::new().train(&mut context).unwrap();
    (context, table)
}

#[test]
fn walk_from_goal_is_a_single_state() {
    let (context, table) = trained_reference(1);
    let path = Walker::new().walk(&context, &table, 0).unwrap();
    assert_eq!(path, vec![0]);
}

#[test]
fn walk_follows_the_learned_corridor_home() {
    let (context, table) = trained_reference(1);
    let mut walker = Walker::new();

    assert_eq!(walker.walk(&context, &table, 1).unwrap(), vec![1, 0]);
    assert_eq!(walker.walk(&context, &table, 4).unwrap(), vec![4, 0]);
    assert_eq!(walker.walk(&context, &table, 5).unwrap(), vec![5, 1, 0]);
}

/// With the canonical shallow discount, every edge out of state 9 has been
/// tried and penalized, so the argmax lands on an untried pair and the walk
/// hops straight to the goal.
#[test]
fn walk_can_hop_untried_pairs_when_all_edges_are_negative() {
    let (context, table) = trained_reference(1);

    for neighbor in context.graph().neighbors(9) {
        assert!(
            table.value_of(9, *neighbor) < 0.0,
            "expected a penalized edge from 9 to {neighbor}"
        );
    }

    let path = Walker::new().walk(&context, &table, 9).unwrap();
    assert_eq!(path, vec![9, 0]);
}

/// A deeper discount makes distant goal reward visible, so greedy walks
/// follow real corridors from every regular state.
#[test]
fn deep_discount_walks_stay_on_edges_and_reach_the_goal() {
    let mut context = ContextBuilder::reference()
        .unwrap()
        .discount_rate(0.9)
        .seed(1)
        .build()
        .unwrap();
    let table = Trainer::new().train(&mut context).unwrap();
    let mut walker = Walker::new();

    // State 11 is the absorbing trap; its row never learns a way out.
    for start in 1..=10 {
        let path = walker.walk(&context, &table, start).unwrap();
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&0), "walk from {start} missed the goal");
        assert!(path.len() <= 12, "walk from {start} is too long: {path:?}");
        for pair in path.windows(2) {
            assert!(
                context.graph().has_edge(pair[0], pair[1]),
                "walk from {start} used a non-edge hop {} -> {}",
                pair[0],
                pair[1]
            );
        }
    }
}

#[test]
fn walk_before_training_is_rejected() {
    let context = ContextBuilder::reference().unwrap().seed(1).build().unwrap();
    let table = QTable::new(12);

    let result = Walker::new().walk(&context, &table, 3);
    assert!(matches!(result, Err(Error::WalkBeforeConvergence)));
}

#[test]
fn walk_with_mismatched_table_is_rejected() {
    let (context, _) = trained_reference(1);
    let wrong_table = QTable::new(5);

    let result = Walker::new().walk(&context, &wrong_table, 3);
    assert!(matches!(
        result,
        Err(Error::QTableDimensionMismatch {
            table_states: 5,
            graph_states: 12,
        })
    ));
}

#[test]
fn walk_from_out_of_bounds_start_is_rejected() {
    let (context, table) = trained_reference(1);

    let result = Walker::new().walk(&context, &table, 99);
    assert!(matches!(
        result,
        Err(Error::StateOutOfBounds {
            state: 99,
            n_states: 12,
        })
    ));
}

/// A table that points two states at each other must surface the loop
/// instead of walking forever.
#[test]
fn crafted_cycle_reports_divergence() {
    let (context, _) = trained_reference(1);

    let mut cyclic = QTable::new(12);
    cyclic.set(1, 2, 5.0);
    cyclic.set(2, 1, 5.0);

    let result = Walker::new().walk(&context, &cyclic, 1);
    match result {
        Err(Error::PolicyDivergence { state, path }) => {
            assert_eq!(state, 1);
            assert_eq!(path, vec![1, 2]);
        }
        other => panic!("expected policy divergence, got {other:?}"),
    }
}

/// Test that the walker reports each visited state to its observer
#[test]
fn walk_notifies_observer_in_order() {
    struct WalkRecorder {
        events: Arc<Mutex<Vec<String>>>,
    }

    impl Observer for WalkRecorder {
        fn on_walk_start(&mut self, start: usize) -> qmaze::Result<()> {
            self.events.lock().unwrap().push(format!("start_{start}"));
            Ok(())
        }

        fn on_state_visited(&mut self, phase: LearningPhase, state: usize) -> qmaze::Result<()> {
            self.events
                .lock()
                .unwrap()
                .push(format!("visit_{phase}_{state}"));
            Ok(())
        }

        fn on_walk_end(&mut self, path: &[usize]) -> qmaze::Result<()> {
            self.events
                .lock()
                .unwrap()
                .push(format!("end_{}", path.len()));
            Ok(())
        }
    }

    let (context, table) = trained_reference(1);
    let events = Arc::new(Mutex::new(Vec::new()));
    let mut walker = Walker::new().with_observer(Box::new(WalkRecorder {
        events: events.clone(),
    }));

    walker.walk(&context, &table, 5).unwrap();

    let event_log = events.lock().unwrap();
    assert_eq!(
        *event_log,
        vec!["start_5", "visit_converged_1", "visit_converged_0", "end_3"]
    );
}
