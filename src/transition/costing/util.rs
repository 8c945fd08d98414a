pub trait Strategy<Ctx> {
    /// A calculable cost which can be any required
    /// type, so long as it is castable into a 64-bit float.
    type Cost: Into<f64>;

    /// The calculation cost you must implement.
    ///
    /// Returns `None` where the context cannot occur, such as a
    /// transition between two positions with no route between them.
    fn calculate(&self, context: Ctx) -> Option<Self::Cost>;

    /// The calculated cost, where an impossible context
    /// costs `f64::INFINITY`.
    #[inline(always)]
    fn cost(&self, ctx: Ctx) -> f64 {
        self.calculate(ctx).map_or(f64::INFINITY, Into::into)
    }
}
