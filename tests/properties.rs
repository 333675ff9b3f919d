//! Property tests over random operation sequences.

use proptest::prelude::*;
use tasklist::{
    projection, Filter, MemoryMedium, Task, TaskPatch, TaskRepository, TaskStore,
};

#[derive(Clone, Debug)]
enum Op {
    Add(String),
    Toggle(usize),
    Edit(usize, String),
    Delete(usize),
}

fn arb_text() -> impl Strategy<Value = String> {
    "[ ]{0,3}[a-zA-Z0-9][a-zA-Z0-9 ]{0,40}[ ]{0,3}"
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => arb_text().prop_map(Op::Add),
        2 => any::<usize>().prop_map(Op::Toggle),
        1 => (any::<usize>(), arb_text()).prop_map(|(i, t)| Op::Edit(i, t)),
        1 => any::<usize>().prop_map(Op::Delete),
    ]
}

fn repo() -> TaskRepository<MemoryMedium> {
    TaskRepository::new(TaskStore::new(MemoryMedium::new(), "todos"))
}

/// Apply `op`, targeting an existing task by index when there is one.
fn apply(repo: &TaskRepository<MemoryMedium>, op: &Op) {
    let tasks = repo.list();
    let pick = |i: &usize| (!tasks.is_empty()).then(|| tasks[i % tasks.len()].id);

    match op {
        Op::Add(text) => {
            repo.add(text).unwrap();
        }
        Op::Toggle(i) => {
            if let Some(id) = pick(i) {
                repo.toggle(id);
            }
        }
        Op::Edit(i, text) => {
            if let Some(id) = pick(i) {
                repo.update(id, TaskPatch::text(text.clone())).unwrap();
            }
        }
        Op::Delete(i) => {
            if let Some(id) = pick(i) {
                repo.delete(id);
            }
        }
    }
}

fn check_invariants(tasks: &[Task]) -> Result<(), TestCaseError> {
    let mut ids: Vec<_> = tasks.iter().map(|t| t.id).collect();
    ids.sort_by_key(|id| id.0);
    ids.dedup();
    prop_assert_eq!(ids.len(), tasks.len());

    for task in tasks {
        prop_assert!(task.updated_at >= task.created_at);
        prop_assert_eq!(task.text.trim(), task.text.as_str());
        prop_assert!(!task.text.is_empty());
        prop_assert!(task.text.encode_utf16().count() <= 200);
    }

    let stats = projection::stats(tasks);
    prop_assert_eq!(stats.total, stats.active + stats.completed);
    prop_assert_eq!(stats.total, tasks.len());
    prop_assert_eq!(projection::filter(tasks, Filter::Active).len(), stats.active);
    prop_assert_eq!(projection::filter(tasks, Filter::Completed).len(), stats.completed);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn invariants_hold_for_any_sequence(ops in prop::collection::vec(arb_op(), 0..40)) {
        let repo = repo();
        for op in &ops {
            apply(&repo, op);
            check_invariants(&repo.list())?;
        }
    }

    #[test]
    fn add_prepends_trimmed(text in arb_text(), existing in 0usize..5) {
        let repo = repo();
        for i in 0..existing {
            repo.add(&format!("existing {i}")).unwrap();
        }
        let before = repo.list();

        let created = repo.add(&text).unwrap().value;
        let after = repo.list();

        prop_assert_eq!(after.len(), before.len() + 1);
        prop_assert_eq!(&after[0], &created);
        prop_assert_eq!(created.text.as_str(), text.trim());
        prop_assert!(!created.completed);
        prop_assert_eq!(&after[1..], &before[..]);
    }

    #[test]
    fn over_length_rejected(extra in 1usize..50) {
        let repo = repo();
        repo.add("keep").unwrap();
        let before = repo.list();

        prop_assert!(repo.add(&"y".repeat(200 + extra)).is_err());
        prop_assert_eq!(repo.list(), before);
    }

    #[test]
    fn toggle_twice_restores(ops in prop::collection::vec(arb_op(), 1..15), pick in any::<usize>()) {
        let repo = repo();
        repo.add("anchor").unwrap();
        for op in &ops {
            apply(&repo, op);
        }
        let tasks = repo.list();
        prop_assume!(!tasks.is_empty());
        let original = tasks[pick % tasks.len()].clone();

        let once = repo.toggle(original.id).value.unwrap();
        let twice = repo.toggle(original.id).value.unwrap();

        prop_assert_eq!(once.completed, !original.completed);
        prop_assert_eq!(twice.completed, original.completed);
        prop_assert!(once.updated_at >= original.updated_at);
        prop_assert!(twice.updated_at >= once.updated_at);
    }

    #[test]
    fn save_load_roundtrip(ops in prop::collection::vec(arb_op(), 0..25)) {
        let repo = repo();
        for op in &ops {
            apply(&repo, op);
        }

        let loaded = repo.store().load();
        prop_assert!(repo.store().save(&loaded));
        prop_assert_eq!(repo.store().load(), loaded);
    }
}
