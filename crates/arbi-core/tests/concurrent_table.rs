use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use arbi_core::{ArbCmd, ArbData, HandleTable, HandleType};

const THREADS: usize = 8;
const PER_THREAD: usize = 200;

#[test]
fn concurrent_creation_yields_unique_handles() {
    let table = Arc::new(HandleTable::new());
    let workers: Vec<_> = (0..THREADS)
        .map(|t| {
            let table = Arc::clone(&table);
            thread::spawn(move || {
                (0..PER_THREAD)
                    .map(|i| {
                        if i % 2 == 0 {
                            table.insert(ArbData::new()).expect("insert arb")
                        } else {
                            let cmd = ArbCmd::new(format!("t{t}"), format!("op{i}"))
                                .expect("valid identifiers");
                            table.insert(cmd).expect("insert cmd")
                        }
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut seen = HashSet::new();
    for w in workers {
        for h in w.join().expect("worker") {
            assert_ne!(h, 0);
            assert!(seen.insert(h), "handle {h} issued twice");
        }
    }
    assert_eq!(table.len(), THREADS * PER_THREAD);
    assert_eq!(table.clear(), THREADS * PER_THREAD);
}

#[test]
fn concurrent_pushes_on_one_handle_are_not_lost() {
    let table = Arc::new(HandleTable::new());
    let h = table.insert(ArbData::new()).expect("insert");

    let workers: Vec<_> = (0..THREADS)
        .map(|t| {
            let table = Arc::clone(&table);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    table
                        .with_arb_mut(h, |arb| {
                            arb.push_arg(format!("{t}:{i}"));
                            Ok(())
                        })
                        .expect("push");
                }
            })
        })
        .collect();
    for w in workers {
        w.join().expect("worker");
    }

    let len = table.with_arb(h, |arb| Ok(arb.len())).expect("len");
    assert_eq!(len, THREADS * PER_THREAD);
    table.delete(h).expect("delete");
}

#[test]
fn delete_racing_with_mutation_is_all_or_nothing() {
    let table = Arc::new(HandleTable::new());
    for _ in 0..50 {
        let h = table.insert(ArbData::new()).expect("insert");
        let pusher = {
            let table = Arc::clone(&table);
            thread::spawn(move || {
                let mut pushed = 0usize;
                for _ in 0..100 {
                    let res = table.with_arb_mut(h, |arb| {
                        arb.push_arg("x");
                        Ok(())
                    });
                    match res {
                        Ok(()) => pushed += 1,
                        Err(err) => {
                            assert_eq!(
                                err.to_string(),
                                format!("Invalid argument: handle {h} is invalid")
                            );
                            break;
                        }
                    }
                }
                pushed
            })
        };
        let deleted = table.take(h).expect("take");
        let pushed = pusher.join().expect("pusher");
        // Every push the deleter did not observe must have failed.
        let observed = match deleted {
            arbi_core::Object::ArbData(data) => data.len(),
            other => panic!("unexpected object {other:?}"),
        };
        assert_eq!(observed, pushed);
        assert_eq!(table.handle_type(h), HandleType::Invalid);
    }
}
