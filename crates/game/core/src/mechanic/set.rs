use super::MechanicKind;

/// Ordered, non-empty collection of mechanics baked into a boss at generation time.
///
/// Ordinary floor bosses carry a single identifier while the Warden and the Raid
/// Boss carry a list. On the wire this is either a bare string or an array, and
/// both shapes deserialize here. Consumers never branch on the shape: they use
/// [`MechanicSet::iter`].
///
/// Binary formats cannot tell the two shapes apart, so non-human-readable
/// serializers always see a sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MechanicSet {
    kinds: Vec<MechanicKind>,
}

impl MechanicSet {
    pub fn single(kind: MechanicKind) -> Self {
        Self { kinds: vec![kind] }
    }

    /// Builds a set from identifiers. Returns `None` for an empty list.
    pub fn from_kinds(kinds: Vec<MechanicKind>) -> Option<Self> {
        if kinds.is_empty() {
            None
        } else {
            Some(Self { kinds })
        }
    }

    /// Parses raw identifiers; unknown ones are kept as [`MechanicKind::Unknown`].
    pub fn parse<I, S>(ids: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_kinds(
            ids.into_iter()
                .map(|id| MechanicKind::parse(id.as_ref()))
                .collect(),
        )
    }

    /// Mechanics in application order.
    pub fn iter(&self) -> std::slice::Iter<'_, MechanicKind> {
        self.kinds.iter()
    }

    pub fn contains(&self, kind: &MechanicKind) -> bool {
        self.kinds.contains(kind)
    }

    /// Always at least 1.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn is_single(&self) -> bool {
        self.kinds.len() == 1
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for MechanicSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.kinds.as_slice() {
            [kind] if serializer.is_human_readable() => {
                serde::Serialize::serialize(kind, serializer)
            }
            kinds => serializer.collect_seq(kinds),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for MechanicSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Shape {
            One(MechanicKind),
            Many(Vec<MechanicKind>),
        }

        let kinds = if deserializer.is_human_readable() {
            match <Shape as serde::Deserialize>::deserialize(deserializer)? {
                Shape::One(kind) => vec![kind],
                Shape::Many(kinds) => kinds,
            }
        } else {
            <Vec<MechanicKind> as serde::Deserialize>::deserialize(deserializer)?
        };
        Self::from_kinds(kinds)
            .ok_or_else(|| serde::de::Error::invalid_length(0, &"at least one mechanic"))
    }
}

impl<'a> IntoIterator for &'a MechanicSet {
    type Item = &'a MechanicKind;
    type IntoIter = std::slice::Iter<'a, MechanicKind>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_and_composite_iterate_uniformly() {
        let single = MechanicSet::single(MechanicKind::Armored);
        let composite =
            MechanicSet::parse(["armored", "retaliator"]).expect("two mechanics parse");

        assert_eq!(single.iter().count(), 1);
        assert_eq!(
            composite.iter().cloned().collect::<Vec<_>>(),
            vec![MechanicKind::Armored, MechanicKind::Retaliator]
        );
        assert!(composite.contains(&MechanicKind::Retaliator));
    }

    #[test]
    fn one_element_list_equals_single() {
        let set = MechanicSet::parse(["phasing"]).unwrap();
        assert_eq!(set, MechanicSet::single(MechanicKind::Phasing));
        assert!(set.is_single());
    }

    #[test]
    fn empty_sets_cannot_be_built() {
        assert!(MechanicSet::parse(Vec::<String>::new()).is_none());
        assert!(MechanicSet::from_kinds(Vec::new()).is_none());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_both_wire_shapes() {
        let single: MechanicSet = serde_json::from_str("\"warded\"").unwrap();
        assert_eq!(single, MechanicSet::single(MechanicKind::Warded));

        let list: MechanicSet = serde_json::from_str("[\"armored\",\"sparkle\"]").unwrap();
        assert_eq!(
            list,
            MechanicSet::from_kinds(vec![
                MechanicKind::Armored,
                MechanicKind::Unknown("sparkle".into())
            ])
            .unwrap()
        );

        assert!(serde_json::from_str::<MechanicSet>("[]").is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn human_readable_output_keeps_single_shape() {
        let single = MechanicSet::single(MechanicKind::Armored);
        assert_eq!(serde_json::to_string(&single).unwrap(), "\"armored\"");
        let warden = MechanicSet::parse(["armored", "retaliator"]).unwrap();
        assert_eq!(
            serde_json::to_string(&warden).unwrap(),
            "[\"armored\",\"retaliator\"]"
        );
    }
}
