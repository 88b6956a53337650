//! Full fetch→merge→persist cycles against real file storage.

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use quotesync::remote::RemoteProvider;
    use quotesync::storage::{self, JsonFileStorage, QuoteStorage};
    use quotesync::store::{pick_random, QuoteStore, ALL_CATEGORIES};
    use quotesync::transfer;
    use quotesync::types::Quote;

    use crate::mock_remote::MockRemote;

    fn temp_path(suffix: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("quotesync_sync_{}{suffix}", uuid::Uuid::new_v4()));
        p
    }

    fn open_file_store(path: &PathBuf) -> QuoteStore {
        QuoteStore::open(Box::new(JsonFileStorage::new(path))).unwrap()
    }

    #[tokio::test]
    async fn test_fresh_start_seeds_and_persists_defaults() {
        let path = temp_path(".json");
        let store = open_file_store(&path);
        assert_eq!(store.len(), 4);

        // The seed must already be on disk before any mutation.
        let on_disk = JsonFileStorage::new(&path).load().unwrap().unwrap();
        assert_eq!(on_disk, store.quotes());

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_sync_cycle_merges_and_persists() {
        let path = temp_path(".json");
        let mut store = open_file_store(&path);
        let remote = MockRemote::new(
            "mock",
            vec![
                Quote::new("Stay hungry, stay foolish.", "Wisdom"), // already local
                Quote::new("remote only", "Server"),
            ],
        );

        let server_quotes = remote.fetch_remote_quotes().await;
        let report = store.merge_remote(&server_quotes).unwrap();
        assert!(report.changed);
        assert_eq!(report.added, vec![Quote::new("remote only", "Server")]);
        assert_eq!(store.len(), 5);

        // Disk copy matches memory after the merge.
        let on_disk = JsonFileStorage::new(&path).load().unwrap().unwrap();
        assert_eq!(on_disk, store.quotes());

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_repeated_cycles_are_idempotent() {
        let path = temp_path(".json");
        let mut store = open_file_store(&path);
        let remote = MockRemote::new("mock", vec![Quote::new("remote only", "Server")]);

        let first = store
            .merge_remote(&remote.fetch_remote_quotes().await)
            .unwrap();
        assert!(first.changed);

        let second = store
            .merge_remote(&remote.fetch_remote_quotes().await)
            .unwrap();
        assert!(!second.changed);
        assert_eq!(store.len(), 5);

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_transport_outage_changes_nothing() {
        let path = temp_path(".json");
        let mut store = open_file_store(&path);
        let remote = MockRemote::new("mock", vec![Quote::new("remote only", "Server")]);
        remote.set_error(true);

        let report = store
            .merge_remote(&remote.fetch_remote_quotes().await)
            .unwrap();
        assert!(!report.changed);
        assert_eq!(store.len(), 4);

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_new_server_quotes_picked_up_next_cycle() {
        let path = temp_path(".json");
        let mut store = open_file_store(&path);
        let remote = MockRemote::new("mock", vec![Quote::new("first wave", "Server")]);

        store
            .merge_remote(&remote.fetch_remote_quotes().await)
            .unwrap();

        remote.set_server_quotes(vec![
            Quote::new("first wave", "Server"),
            Quote::new("second wave", "Server"),
        ]);
        let report = store
            .merge_remote(&remote.fetch_remote_quotes().await)
            .unwrap();
        assert_eq!(report.added, vec![Quote::new("second wave", "Server")]);
        assert_eq!(store.len(), 6);

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_add_then_push_mirrors_local_addition() {
        let path = temp_path(".json");
        let mut store = open_file_store(&path);
        let remote = MockRemote::new("mock", Vec::new());

        let created = store.add("fresh local quote", "Life").unwrap();
        remote.push_quote(&created).await;

        assert_eq!(remote.pushed(), vec![created]);
        assert_eq!(store.len(), 5);

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_collection_survives_reopen() {
        let path = temp_path(".json");
        {
            let mut store = open_file_store(&path);
            let remote = MockRemote::new("mock", vec![Quote::new("durable", "Server")]);
            store
                .merge_remote(&remote.fetch_remote_quotes().await)
                .unwrap();
        }

        // A new store over the same file sees the merged collection.
        let reopened = open_file_store(&path);
        assert_eq!(reopened.len(), 5);
        assert!(reopened
            .quotes()
            .contains(&Quote::new("durable", "Server")));

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_filter_and_random_pick_after_sync() {
        let path = temp_path(".json");
        let mut store = open_file_store(&path);
        let remote = MockRemote::new("mock", vec![Quote::new("remote only", "Server")]);
        store
            .merge_remote(&remote.fetch_remote_quotes().await)
            .unwrap();

        let server_only = store.filtered_by("Server");
        assert_eq!(server_only.len(), 1);
        assert_eq!(pick_random(&server_only), Some(&server_only[0]));

        assert_eq!(store.filtered_by(ALL_CATEGORIES).len(), 5);
        assert!(store.filtered_by("NoSuchCategory").is_empty());

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_filter_persists_across_runs() {
        let path = temp_path(".txt");
        storage::save_filter(&path, "Wisdom").unwrap();
        assert_eq!(
            storage::load_filter(&path).unwrap(),
            Some("Wisdom".to_string())
        );
        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_export_import_between_stores() {
        let src_path = temp_path("_src.json");
        let dst_path = temp_path("_dst.json");
        let export_path = temp_path("_export.json");

        let mut src = open_file_store(&src_path);
        src.add("exported quote", "Exchange").unwrap();
        transfer::write_quotes_file(&export_path, src.quotes()).unwrap();

        let mut dst = open_file_store(&dst_path);
        let payload = transfer::read_import_file(&export_path).unwrap();
        // The source store holds the 4 seeds plus one addition.
        assert_eq!(dst.import_batch(&payload).unwrap(), 5);
        assert_eq!(dst.len(), 9);
        assert!(dst.quotes().contains(&Quote::new("exported quote", "Exchange")));

        for p in [&src_path, &dst_path, &export_path] {
            std::fs::remove_file(p).unwrap();
        }
    }
}
