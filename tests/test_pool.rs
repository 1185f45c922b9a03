use psx_demos::pool::{Pool, SaturationPolicy};

fn recycle(capacity: usize) -> Pool<u32> {
    Pool::new(capacity, SaturationPolicy::Recycle)
}

fn active_values(pool: &Pool<u32>) -> Vec<u32> {
    pool.iter_active().map(|(_, v)| *v).collect()
}

// ── Construction ──────────────────────────────────────────────────────────────

#[test]
fn new_pool_is_empty() {
    let pool = recycle(4);
    assert_eq!(pool.capacity(), 4);
    assert_eq!(pool.cursor(), 0);
    assert_eq!(pool.active_count(), 0);
    assert!(pool.iter_active().next().is_none());
}

#[test]
#[should_panic]
fn zero_capacity_panics() {
    let _ = recycle(0);
}

// ── Allocation ────────────────────────────────────────────────────────────────

#[test]
fn allocation_is_round_robin() {
    let mut pool = recycle(3);
    assert_eq!(pool.allocate(10), Some(0));
    assert_eq!(pool.allocate(11), Some(1));
    assert_eq!(pool.allocate(12), Some(2));
    assert_eq!(pool.cursor(), 0);
}

#[test]
fn recycle_reuses_oldest_slot_when_saturated() {
    let capacity = 4;
    let mut pool = recycle(capacity);
    for i in 0..capacity as u32 {
        pool.allocate(i);
    }

    // The (C+1)th allocation lands where the first one did.
    assert_eq!(pool.allocate(99), Some(0));
    assert_eq!(pool.active_count(), capacity);
    let values = active_values(&pool);
    assert!(!values.contains(&0), "overwritten entity still enumerated");
    assert_eq!(values, vec![99, 1, 2, 3]);
}

#[test]
fn recycle_keeps_cycling_past_capacity() {
    let mut pool = recycle(3);
    let issued: Vec<usize> = (0..7).map(|i| pool.allocate(i).unwrap()).collect();
    assert_eq!(issued, vec![0, 1, 2, 0, 1, 2, 0]);
}

#[test]
fn reject_refuses_when_full() {
    let mut pool = Pool::new(2, SaturationPolicy::Reject);
    assert_eq!(pool.allocate(1), Some(0));
    assert_eq!(pool.allocate(2), Some(1));
    assert_eq!(pool.allocate(3), None);
    assert_eq!(active_values(&pool), vec![1, 2]);
}

#[test]
fn reject_skips_to_next_free_slot() {
    let mut pool = Pool::new(4, SaturationPolicy::Reject);
    for i in 0..4 {
        pool.allocate(i);
    }
    pool.release(2);
    // Cursor is back at 0, which is live; the free slot is found further on.
    assert_eq!(pool.allocate(42), Some(2));
    assert_eq!(pool.cursor(), 3);
}

#[test]
fn reject_matches_recycle_order_while_slots_free_up() {
    let mut pool = Pool::new(3, SaturationPolicy::Reject);
    let mut issued = Vec::new();
    for i in 0..6 {
        let index = pool.allocate(i).unwrap();
        issued.push(index);
        pool.release(index);
    }
    assert_eq!(issued, vec![0, 1, 2, 0, 1, 2]);
}

// ── Release / enumeration ─────────────────────────────────────────────────────

#[test]
fn released_slot_is_never_enumerated() {
    let mut pool = recycle(4);
    let a = pool.allocate(1).unwrap();
    pool.allocate(2);
    pool.release(a);

    for _ in 0..3 {
        let mut seen = Vec::new();
        pool.for_each_active(|i, _| seen.push(i));
        assert_eq!(seen, vec![1]);
    }
    assert!(pool.get(a).is_none());
    assert!(!pool.is_active(a));
}

#[test]
fn released_slot_comes_back_on_reallocation() {
    let mut pool = recycle(1);
    pool.allocate(1);
    pool.release(0);
    assert_eq!(pool.active_count(), 0);
    pool.allocate(2);
    assert_eq!(pool.get(0), Some(&2));
}

#[test]
fn release_out_of_range_is_ignored() {
    let mut pool = recycle(2);
    pool.allocate(5);
    pool.release(17);
    assert_eq!(pool.active_count(), 1);
}

#[test]
fn enumeration_is_array_order_not_insertion_order() {
    let mut pool = recycle(3);
    pool.allocate(1);
    pool.allocate(2);
    pool.allocate(3);
    pool.release(0);
    pool.release(1);
    pool.allocate(4); // slot 0
    assert_eq!(active_values(&pool), vec![4, 3]);
}

#[test]
fn retain_active_updates_and_releases() {
    let mut pool = recycle(4);
    for v in [1, 5, 9] {
        pool.allocate(v);
    }
    pool.retain_active(|v| {
        *v += 1;
        *v < 8
    });
    assert_eq!(active_values(&pool), vec![2, 6]);
}

#[test]
fn for_each_active_mut_skips_inactive() {
    let mut pool = recycle(3);
    pool.allocate(1);
    pool.allocate(2);
    pool.release(0);
    pool.for_each_active_mut(|_, v| *v *= 10);
    assert_eq!(active_values(&pool), vec![20]);
}

#[test]
fn release_all_clears_everything() {
    let mut pool = recycle(3);
    pool.allocate(1);
    pool.allocate(2);
    pool.release_all();
    assert_eq!(pool.active_count(), 0);
    assert!(pool.get_mut(0).is_none());
}
