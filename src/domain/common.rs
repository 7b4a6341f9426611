use uuid::Uuid;

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Supplies a common contract for retrieving dollar amounts.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// Sums amounts, treating non-finite values as zero.
pub fn sum_amounts<'a, T, I>(items: I) -> f64
where
    T: Amounted + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .map(T::amount)
        .filter(|amount| amount.is_finite())
        .sum()
}
