use std::collections::HashSet;
use std::sync::Arc;

use bazaar_persist::{ChatRegistry, InMemoryChatStore, PersistError};
use bson::oid::ObjectId;
use chrono::{Duration, Utc};

fn registry() -> ChatRegistry {
    ChatRegistry::new(Arc::new(InMemoryChatStore::new()))
}

fn user() -> String {
    ObjectId::new().to_hex()
}

#[tokio::test]
async fn test_create_returns_fresh_ids() {
    let registry = registry();
    let (u1, u2) = (user(), user());

    let mut seen = HashSet::new();
    for _ in 0..20 {
        let id = registry.create_chat(&[&u1, &u2]).await.unwrap();
        assert!(seen.insert(id), "identifier handed out twice");
    }
}

#[tokio::test]
async fn test_created_chat_visible_to_every_participant() {
    let registry = registry();
    let (u1, u2) = (user(), user());

    let before = Utc::now() - Duration::milliseconds(1);
    let id = registry.create_chat(&[&u1, &u2]).await.unwrap();
    let after = Utc::now();

    for participant in [&u1, &u2] {
        let chats = registry.list_chats(participant).await.unwrap();
        let matching: Vec<_> = chats.iter().filter(|c| c.id == id).collect();
        assert_eq!(matching.len(), 1);

        let chat = matching[0];
        assert_eq!(chat.last_message, "");
        assert!(chat.last_message_time >= before && chat.last_message_time <= after);
        assert!(chat.has_participant(&u1) && chat.has_participant(&u2));
    }
}

#[tokio::test]
async fn test_list_is_most_recent_first() {
    let registry = registry();
    let me = user();
    let base = Utc::now();

    let mut ids = Vec::new();
    for offset in [3, 1, 4, 2, 5] {
        let id = registry.create_chat(&[&me, &user()]).await.unwrap();
        registry
            .update_chat(&id, format!("msg {offset}"), base + Duration::seconds(offset))
            .await
            .unwrap();
        ids.push(id);
    }

    let chats = registry.list_chats(&me).await.unwrap();
    assert_eq!(chats.len(), 5);
    for pair in chats.windows(2) {
        assert!(pair[0].last_message_time > pair[1].last_message_time);
    }
    assert_eq!(chats[0].last_message, "msg 5");
    assert_eq!(chats[4].last_message, "msg 1");
}

#[tokio::test]
async fn test_update_replaces_only_last_message_pair() {
    let registry = registry();
    let (u1, u2) = (user(), user());
    let id = registry.create_chat(&[&u1, &u2]).await.unwrap();
    let original = registry.list_chats(&u1).await.unwrap().remove(0);

    let at = Utc::now() + Duration::minutes(1);
    let ack = registry.update_chat(&id, "hello", at).await.unwrap();
    assert_eq!(ack.matched_count, 1);
    assert_eq!(ack.modified_count, 1);

    let updated = registry.list_chats(&u2).await.unwrap().remove(0);
    assert_eq!(updated.id, original.id);
    assert_eq!(updated.participants, original.participants);
    assert_eq!(updated.last_message, "hello");
    assert_eq!(updated.last_message_time, bazaar_persist::models::to_store_precision(at));
}

#[tokio::test]
async fn test_update_accepts_older_timestamp() {
    let registry = registry();
    let u1 = user();
    let id = registry.create_chat(&[&u1]).await.unwrap();

    let earlier = Utc::now() - Duration::days(1);
    let ack = registry.update_chat(&id, "from the past", earlier).await.unwrap();
    assert!(ack.matched());

    let chat = registry.list_chats(&u1).await.unwrap().remove(0);
    assert_eq!(chat.last_message, "from the past");
}

#[tokio::test]
async fn test_update_unknown_chat_is_zero_match() {
    let registry = registry();

    let ack = registry
        .update_chat(&ObjectId::new().to_hex(), "hello", Utc::now())
        .await
        .unwrap();

    assert_eq!(ack.matched_count, 0);
    assert_eq!(ack.modified_count, 0);
}

#[tokio::test]
async fn test_list_for_user_without_chats_is_empty() {
    let registry = registry();
    registry.create_chat(&[&user(), &user()]).await.unwrap();

    let chats = registry.list_chats(&user()).await.unwrap();
    assert!(chats.is_empty());
}

#[tokio::test]
async fn test_empty_participant_set_is_accepted() {
    let registry = registry();
    let id = registry.create_chat::<&str>(&[]).await.unwrap();
    assert_eq!(id.len(), 24);
}

#[tokio::test]
async fn test_malformed_identifier_never_reaches_store() {
    let store = Arc::new(InMemoryChatStore::new());
    let registry = ChatRegistry::new(store.clone());

    let err = registry.create_chat(&["zzzzzzzzzzzzzzzzzzzzzzzz"]).await.unwrap_err();
    assert!(matches!(err, PersistError::InvalidIdentifier(_)));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_recency_scenario() {
    let registry = registry();
    let (u1, u2, u3) = (user(), user(), user());

    let a = registry.create_chat(&[&u1, &u2]).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let b = registry.create_chat(&[&u1, &u3]).await.unwrap();

    let order: Vec<String> = registry
        .list_chats(&u1)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(order, vec![b.clone(), a.clone()]);

    let t2 = Utc::now() + Duration::seconds(1);
    registry.update_chat(&a, "hi", t2).await.unwrap();

    let chats = registry.list_chats(&u1).await.unwrap();
    let order: Vec<&str> = chats.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(order, vec![a.as_str(), b.as_str()]);
    assert_eq!(chats[0].last_message, "hi");

    // u2 and u3 each see only their own chat
    assert_eq!(registry.list_chats(&u2).await.unwrap().len(), 1);
    assert_eq!(registry.list_chats(&u3).await.unwrap()[0].id, b);
}

#[tokio::test]
async fn test_concurrent_creates_do_not_conflict() {
    let registry = registry();
    let me = user();

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let registry = registry.clone();
            let me = me.clone();
            tokio::spawn(async move { registry.create_chat(&[me]).await })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        ids.insert(handle.await.unwrap().unwrap());
    }
    assert_eq!(ids.len(), 16);
    assert_eq!(registry.list_chats(&me).await.unwrap().len(), 16);
}
