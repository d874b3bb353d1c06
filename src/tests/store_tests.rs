use super::*;

#[test]
fn init_writes_defaults_and_refuses_reinit() -> Result<()> {
    let tmp = tempfile::tempdir().context("create tempdir")?;
    let root = MealStore::store_dir(tmp.path());

    let store = MealStore::init(&root, false)?;
    assert_eq!(store.read_config()?, WidgetConfig::default());
    assert!(store.read_instances()?.instances.is_empty());

    assert!(MealStore::init(&root, false).is_err());
    MealStore::init(&root, true)?;
    Ok(())
}

#[test]
fn open_requires_existing_store() -> Result<()> {
    let tmp = tempfile::tempdir().context("create tempdir")?;
    assert!(MealStore::open(&tmp.path().join("missing")).is_err());
    Ok(())
}

#[test]
fn snapshot_is_absent_until_pushed() -> Result<()> {
    let tmp = tempfile::tempdir().context("create tempdir")?;
    let store = MealStore::init(&MealStore::store_dir(tmp.path()), false)?;
    let snapshots = store.snapshot_store();

    assert_eq!(snapshots.load()?, None);
    set_snapshot(snapshots.as_ref(), "not even json")?;
    assert_eq!(snapshots.load()?.as_deref(), Some("not even json"));

    set_snapshot(snapshots.as_ref(), r#"{"mealType":"DINNER"}"#)?;
    assert_eq!(
        snapshots.load()?.as_deref(),
        Some(r#"{"mealType":"DINNER"}"#)
    );
    Ok(())
}

#[test]
fn prefs_keys_are_independent_and_validated() -> Result<()> {
    let tmp = tempfile::tempdir().context("create tempdir")?;
    let prefs = PrefsStore::new(tmp.path().join("prefs"));

    prefs.put_string("a", "1")?;
    prefs.put_string("b", "2")?;
    assert_eq!(prefs.get_string("a")?.as_deref(), Some("1"));
    prefs.remove("a")?;
    prefs.remove("a")?;
    assert_eq!(prefs.get_string("a")?, None);
    assert_eq!(prefs.get_string("b")?.as_deref(), Some("2"));

    assert!(prefs.put_string("../escape", "x").is_err());
    assert!(prefs.put_string("", "x").is_err());
    Ok(())
}

#[test]
fn concurrent_readers_never_see_torn_values() -> Result<()> {
    let tmp = tempfile::tempdir().context("create tempdir")?;
    let prefs = Arc::new(PrefsStore::new(tmp.path().join("prefs")));
    let a = "a".repeat(64 * 1024);
    let b = "b".repeat(64 * 1024);
    prefs.save(&a)?;

    let writer = {
        let prefs = prefs.clone();
        let (a, b) = (a.clone(), b.clone());
        std::thread::spawn(move || -> Result<()> {
            for i in 0..50 {
                prefs.save(if i % 2 == 0 { &b } else { &a })?;
            }
            Ok(())
        })
    };
    for _ in 0..200 {
        let seen = prefs.load()?.unwrap_or_default();
        assert!(seen == a || seen == b, "torn read of {} bytes", seen.len());
    }
    writer
        .join()
        .map_err(|_| anyhow!("writer thread panicked"))??;
    Ok(())
}

#[test]
fn memory_store_replaces_value() -> Result<()> {
    let store = MemoryStore::new();
    assert_eq!(store.load()?, None);
    store.save("one")?;
    store.save("two")?;
    assert_eq!(store.load()?.as_deref(), Some("two"));
    Ok(())
}

#[test]
fn failed_push_is_reported_to_caller() -> Result<()> {
    let tmp = tempfile::tempdir().context("create tempdir")?;
    let blocker = tmp.path().join("prefs");
    fs::write(&blocker, "not a directory").context("write blocker file")?;
    let prefs = PrefsStore::new(blocker);

    let err = set_snapshot(&prefs, r#"{"mealType":"DINNER"}"#)
        .expect_err("save into a regular file must fail");
    assert_eq!(err.to_string(), "save widget data");
    assert_eq!(prefs.load().ok().flatten(), None);
    Ok(())
}
