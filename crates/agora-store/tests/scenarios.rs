/// End-to-end scenarios against the public store API: registration and
/// login, posting with undo, the friend handshake, and message delivery.

use agora_store::{SocialStore, StoreConfig, StoreError};
use agora_types::api::{Session, UndoOutcome};

fn store() -> SocialStore {
    SocialStore::new(StoreConfig {
        hash_memory_kib: 8,
        hash_iterations: 1,
        rng_seed: Some(2024),
        ..StoreConfig::default()
    })
    .unwrap()
}

fn login(store: &SocialStore, name: &str, password: &str) -> Session {
    store.login(name, password).unwrap()
}

#[test]
fn friend_handshake_between_alice_and_bob() {
    let store = store();
    let a = store.register("alice", "pw1").unwrap();
    let b = store.register("bob", "pw2").unwrap();
    assert_ne!(a, b);

    let alice = login(&store, "alice", "pw1");
    assert_eq!(alice.user_id, a);
    store.send_friend_request(&alice, "bob").unwrap();

    let bob = login(&store, "bob", "pw2");
    assert_eq!(store.accept_friend_request(&bob).unwrap(), "alice");

    assert!(store.list_friends(&bob).unwrap().contains(&"alice".to_string()));
    assert!(store.list_friends(&alice).unwrap().contains(&"bob".to_string()));
}

#[test]
fn undo_removes_fresh_post() {
    let store = store();
    store.register("alice", "pw1").unwrap();
    let alice = login(&store, "alice", "pw1");

    store.create_post(&alice, "keep").unwrap();
    let before = store.list_all_posts().unwrap().len();

    store.create_post(&alice, "hi").unwrap();
    assert!(matches!(
        store.undo_last().unwrap(),
        UndoOutcome::PostRemoved { .. }
    ));

    let posts = store.list_all_posts().unwrap();
    assert_eq!(posts.len(), before);
    assert!(!posts.iter().any(|p| p.author == "alice" && p.content == "hi"));
}

#[test]
fn post_count_tracks_creates_minus_undos() {
    let store = store();
    store.register("alice", "pw1").unwrap();
    let alice = login(&store, "alice", "pw1");

    for i in 0..5 {
        store.create_post(&alice, &format!("post {}", i)).unwrap();
    }
    store.undo_last().unwrap();
    store.undo_last().unwrap();

    let contents: Vec<String> = store
        .list_all_posts()
        .unwrap()
        .into_iter()
        .map(|p| p.content)
        .collect();
    assert_eq!(contents, vec!["post 2", "post 1", "post 0"]);
}

#[test]
fn every_registered_user_has_a_profile() {
    let store = store();
    let ids: Vec<_> = ["alice", "bob", "carol", "dave"]
        .iter()
        .map(|name| (store.register(name, "pw").unwrap(), *name))
        .collect();

    assert_eq!(store.profile_count().unwrap(), ids.len());
    for (id, name) in ids {
        let profile = store.profile(id).unwrap().unwrap();
        assert_eq!(profile.user_id, id);
        assert_eq!(profile.username, name);
        assert_eq!(profile.bio, "Hello, I am new!");
    }
}

#[test]
fn custom_bio_is_applied() {
    let store = SocialStore::new(StoreConfig {
        default_bio: "fresh".into(),
        hash_memory_kib: 8,
        hash_iterations: 1,
        ..StoreConfig::default()
    })
    .unwrap();

    let id = store.register("alice", "pw").unwrap();
    assert_eq!(store.profile(id).unwrap().unwrap().bio, "fresh");
}

#[test]
fn three_messages_delivered_in_order() {
    let store = store();
    store.register("alice", "pw1").unwrap();
    store.register("bob", "pw2").unwrap();
    let alice = login(&store, "alice", "pw1");
    let bob = login(&store, "bob", "pw2");

    store.send_message(&alice, "bob", "first").unwrap();
    store.send_message(&alice, "bob", "second").unwrap();
    store.send_message(&alice, "bob", "third").unwrap();

    let read: Vec<String> = (0..3)
        .map(|_| store.read_next_message(&bob).unwrap().content)
        .collect();
    assert_eq!(read, vec!["first", "second", "third"]);
}

#[test]
fn fresh_store_has_nothing_to_undo() {
    assert_eq!(store().undo_last(), Err(StoreError::NothingToUndo));
}

#[test]
fn deleting_sender_drops_their_queued_messages() {
    let store = store();
    store.register("alice", "pw1").unwrap();
    store.register("bob", "pw2").unwrap();
    let alice = login(&store, "alice", "pw1");
    let bob = login(&store, "bob", "pw2");

    store.send_message(&alice, "bob", "hello").unwrap();
    store.delete_self(&alice).unwrap();

    // Messages from a deleted account are dropped with it
    assert_eq!(store.read_next_message(&bob), Err(StoreError::NoMessages));
    assert!(store.find_user_by_username("alice").unwrap().is_none());
}

#[test]
fn tiny_id_space_runs_out() {
    let store = SocialStore::new(StoreConfig {
        id_space: 1,
        id_attempts: 3,
        hash_memory_kib: 8,
        hash_iterations: 1,
        ..StoreConfig::default()
    })
    .unwrap();

    assert_eq!(store.register("alice", "pw").unwrap(), 1);
    assert_eq!(
        store.register("bob", "pw"),
        Err(StoreError::IdSpaceExhausted {
            space: 1,
            attempts: 3
        })
    );
    assert_eq!(store.user_count().unwrap(), 1);
    assert_eq!(store.profile_count().unwrap(), 1);
}

#[test]
fn store_is_shareable_across_threads() {
    use std::sync::Arc;
    use std::thread;

    let store = Arc::new(store());
    store.register("hub", "pw").unwrap();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let store = store.clone();
            thread::spawn(move || {
                let name = format!("worker{}", i);
                store.register(&name, "pw").unwrap();
                let session = store.login(&name, "pw").unwrap();
                store.send_message(&session, "hub", &name).unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let hub = store.login("hub", "pw").unwrap();
    let mut senders = Vec::new();
    while let Ok(message) = store.read_next_message(&hub) {
        senders.push(message.content);
    }
    senders.sort();
    assert_eq!(senders, vec!["worker0", "worker1", "worker2", "worker3"]);
}
