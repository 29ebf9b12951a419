#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Width(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Height(pub usize);

/// Fraction of a grid dimension a single carving jump may span, in (0, 1].
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct ReachRatio(pub f64);

/// Probability, in [0, 1], of reordering carve candidates towards
/// already-visited regions on any given visit.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct BiasChance(pub f64);
