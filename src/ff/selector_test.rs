use std::error::Error;

use crate::ff::{
    selector::{EffectSelector, SharedSelector},
    EffectHandle,
};

#[tokio::test]
async fn test_consume() -> Result<(), Box<dyn Error>> {
    let handle = EffectHandle::from(3);

    let mut selector = EffectSelector::None;
    assert_eq!(selector.consume(), None);

    selector = EffectSelector::Continuous(handle);
    assert_eq!(selector.consume(), Some(handle));
    assert_eq!(selector.consume(), Some(handle));
    assert_eq!(selector, EffectSelector::Continuous(handle));

    selector = EffectSelector::OneShot(handle);
    assert_eq!(selector.consume(), Some(handle));
    assert_eq!(selector, EffectSelector::None);
    assert_eq!(selector.consume(), None);

    Ok(())
}

#[tokio::test]
async fn test_one_shot_fires_once_across_tasks() -> Result<(), Box<dyn Error>> {
    let handle = EffectHandle::from(1);
    let selector = SharedSelector::new();
    selector.set(EffectSelector::OneShot(handle));

    let mut tasks = Vec::new();
    for _ in 0..8 {
        let selector = selector.clone();
        tasks.push(tokio::spawn(async move { selector.consume() }));
    }

    let mut fired = 0;
    for task in tasks {
        if task.await?.is_some() {
            fired += 1;
        }
    }
    assert_eq!(fired, 1);
    assert_eq!(selector.get(), EffectSelector::None);

    Ok(())
}

#[tokio::test]
async fn test_latest_selection_wins() -> Result<(), Box<dyn Error>> {
    let light = EffectHandle::from(0);
    let strong = EffectHandle::from(1);
    let selector = SharedSelector::new();

    selector.set(EffectSelector::Continuous(light));
    selector.set(EffectSelector::OneShot(strong));
    assert_eq!(selector.consume(), Some(strong));
    // The continuous selection was replaced, not queued
    assert_eq!(selector.consume(), None);

    selector.set(EffectSelector::Continuous(light));
    selector.clear();
    assert_eq!(selector.get(), EffectSelector::None);

    Ok(())
}
