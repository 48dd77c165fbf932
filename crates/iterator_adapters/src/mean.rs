#[cfg(test)]
mod tests {
    use ordered_float::OrderedFloat;

    use crate::IteratorAdapter;

    #[test]
    fn integer() {
        assert_eq!(([1, 2].into_iter()).mean(), 1);
        assert_eq!([1, 2, 3, 4].into_iter().mean(), 2);
        assert_eq!([-3, -2, -1, 4].into_iter().mean(), 0);
        assert_eq!([-1, 2, 3, 4, 5].into_iter().mean(), 2);
    }

    #[test]
    fn float() {
        assert_eq!(([1.0, 2.0].into_iter()).mean(), 1.5);
        assert_eq!([-3.0, -2.0, -1.0, 4.0].into_iter().mean(), -0.5);
        assert_eq!([-1.0, 2.0, 3.0, 4.0, 5.0].into_iter().mean(), 2.6);
        // Operations on NAN give more NAN. Ordered Float required for NAN == NAN.
        assert_eq!(
            [OrderedFloat(-3.0), OrderedFloat(f64::NAN), OrderedFloat(1.0)]
                .into_iter()
                .mean(),
            OrderedFloat(f64::NAN)
        );
    }

    #[test]
    fn empty_float_is_nan() {
        assert!(std::iter::empty::<f64>().mean().is_nan());
    }

    #[test]
    fn magnitude_column() {
        let magnitude_db = [-12.5f64, -3.25, 0.0, 4.75, -30.0];
        let mean = magnitude_db.iter().copied().mean();
        assert!((mean - (-8.2)).abs() < 1e-12);
    }
}
