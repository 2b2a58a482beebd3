//! Stable least-significant-digit radix sort
//!
//! Keys are byte digits addressed by position. A key function returns `None`
//! past an item's natural length; that sentinel sorts before every real digit,
//! so shorter keys order before longer keys sharing their prefix.

/// Number of counting buckets: one sentinel plus 256 byte digits
const BUCKETS: usize = 257;

#[inline]
fn bucket(digit: Option<u8>) -> usize {
    match digit {
        None => 0,
        Some(d) => d as usize + 1,
    }
}

/// Length of the longest key, found by probing positions until every item is exhausted
pub fn max_key_len<T, F>(items: &[T], key: &F) -> usize
where
    F: Fn(&T, usize) -> Option<u8>,
{
    let mut len = 0;
    while items.iter().any(|item| key(item, len).is_some()) {
        len += 1;
    }
    len
}

/// Return the permutation of `items` indices that sorts them by key
///
/// One stable counting pass runs per key position, from the last defined
/// position down to 0. Items with equal keys keep their input order.
pub fn sort_order<T, F>(items: &[T], key: F) -> Vec<usize>
where
    F: Fn(&T, usize) -> Option<u8>,
{
    let mut order: Vec<usize> = (0..items.len()).collect();
    let mut scratch = vec![0usize; items.len()];
    let mut counts = [0usize; BUCKETS];

    for position in (0..max_key_len(items, &key)).rev() {
        counts.fill(0);
        for &index in &order {
            counts[bucket(key(&items[index], position))] += 1;
        }

        // Exclusive prefix sums give each bucket its first output slot
        let mut next = 0;
        for count in counts.iter_mut() {
            let size = *count;
            *count = next;
            next += size;
        }

        for &index in &order {
            let slot = &mut counts[bucket(key(&items[index], position))];
            scratch[*slot] = index;
            *slot += 1;
        }
        std::mem::swap(&mut order, &mut scratch);
    }

    order
}

/// Sort a copy of `items` by key, stably
pub fn radix_sort<T, F>(items: &[T], key: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T, usize) -> Option<u8>,
{
    sort_order(items, key)
        .into_iter()
        .map(|index| items[index].clone())
        .collect()
}
