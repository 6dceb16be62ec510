/// An append-only destination for output features.
pub trait FeatureSink<T> {
    fn add_feature(&mut self, feature: T);

    fn add_features<I: IntoIterator<Item = T>>(&mut self, features: I)
    where
        Self: Sized,
    {
        for f in features {
            self.add_feature(f);
        }
    }
}

impl<T> FeatureSink<T> for Vec<T> {
    fn add_feature(&mut self, feature: T) {
        self.push(feature);
    }
}

#[cfg(test)]
mod test {
    use super::FeatureSink;

    #[derive(Default)]
    struct Counter {
        total: usize,
    }

    impl FeatureSink<usize> for Counter {
        fn add_feature(&mut self, feature: usize) {
            self.total += feature;
        }
    }

    #[test]
    fn test_sinks() {
        let mut v: Vec<&str> = vec![];
        v.add_feature("a");
        v.add_features(["b", "c"]);
        assert_eq!(v, vec!["a", "b", "c"]);

        let mut c = Counter::default();
        c.add_features(1..=4);
        assert_eq!(c.total, 10);
    }
}
