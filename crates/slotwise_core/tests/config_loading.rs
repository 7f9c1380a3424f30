//! Containers built from TOML configs.

use slotwise_core::{
    AllocatorConfig, BoundedSlotAllocator, ConfigError, ListConfig, ListError, ReusableArrayList,
    SlotError,
};

#[test]
fn test_allocator_from_toml() {
    let config = AllocatorConfig::from_toml_str("capacity = 3").unwrap();
    let slots: BoundedSlotAllocator<u16> = BoundedSlotAllocator::from_config(&config).unwrap();

    for value in 0..3 {
        slots.add(value).unwrap();
    }
    assert_eq!(slots.add(3), Err(SlotError::Full { capacity: 3 }));
}

#[test]
fn test_unvalidated_allocator_config_rejected() {
    let config = AllocatorConfig { capacity: 0 };
    let err = BoundedSlotAllocator::<u16>::from_config(&config).unwrap_err();
    assert!(matches!(
        err,
        SlotError::InvalidConfig(ConfigError::InvalidValue { field: "capacity", .. })
    ));
}

#[test]
fn test_list_thresholds_from_toml() {
    let config = ListConfig::from_toml_str(
        r"
        defer_threshold = 2
        scan_threshold = 1
        ",
    )
    .unwrap();
    let mut list: ReusableArrayList<i32> = ReusableArrayList::with_config(config).unwrap();
    for value in [1, 2, 3, 4] {
        list.add(value);
    }

    // 4 live > 2: hole.
    assert!(list.remove_at(0));
    assert_eq!(list.hole_count(), 1);
    // 3 live > 2: hole.
    assert!(list.remove_at(1));
    assert_eq!(list.hole_count(), 2);
    // 2 live: shift.
    assert!(list.remove_at(2));
    assert_eq!(list.hole_count(), 2);
    assert_eq!(list.to_vec(), vec![4]);
    assert_eq!(list.index_of(&4), Some(2));
}

#[test]
fn test_bad_list_config_surfaces_as_list_error() {
    let config = ListConfig {
        growth_factor: 0.5,
        ..ListConfig::default()
    };
    let err = ReusableArrayList::<i32>::with_config(config).unwrap_err();
    assert!(matches!(err, ListError::InvalidConfig(_)));
    assert!(err.to_string().contains("growth_factor"));
}

#[test]
fn test_huge_capacity_from_toml_is_an_error() {
    let err = AllocatorConfig::from_toml_str("capacity = 16777217").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { field: "capacity", .. }));

    let config = AllocatorConfig { capacity: u32::MAX as usize };
    let err = BoundedSlotAllocator::<u64>::from_config(&config).unwrap_err();
    assert!(matches!(err, SlotError::InvalidConfig(_)));
}
