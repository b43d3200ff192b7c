//! Partitioning regions by part and content kind.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::model::{ContentKind, PartLabel, Question, Region};

/// Regions of one bucket, split by kind, in list order.
#[derive(Debug, Default)]
pub struct KindBuckets<'a> {
    pub text: Vec<&'a Region>,
    pub table: Vec<&'a Region>,
    pub diagram: Vec<&'a Region>,
}

impl<'a> KindBuckets<'a> {
    fn push(&mut self, region: &'a Region) {
        match region.kind {
            ContentKind::Text => self.text.push(region),
            ContentKind::Table => self.table.push(region),
            ContentKind::Diagram => self.diagram.push(region),
        }
    }

    pub fn get(&self, kind: ContentKind) -> &[&'a Region] {
        match kind {
            ContentKind::Text => &self.text,
            ContentKind::Table => &self.table,
            ContentKind::Diagram => &self.diagram,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.table.is_empty() && self.diagram.is_empty()
    }
}

/// A question's regions grouped into the main bucket and one bucket per part.
#[derive(Debug)]
pub struct Buckets<'a> {
    pub main: KindBuckets<'a>,
    /// One entry per part label of the question, even when empty
    pub parts: BTreeMap<PartLabel, KindBuckets<'a>>,
}

impl<'a> Buckets<'a> {
    /// Group `regions` for `question`.
    ///
    /// Fails if a region names a part the question does not have.
    pub fn partition(question: &Question, regions: &'a [Region]) -> Result<Self> {
        let mut parts: BTreeMap<PartLabel, KindBuckets<'a>> = question
            .parts
            .iter()
            .map(|l| (l.clone(), KindBuckets::default()))
            .collect();
        let mut main = KindBuckets::default();

        for region in regions {
            match &region.part {
                None => main.push(region),
                Some(label) => parts
                    .get_mut(label)
                    .ok_or_else(|| {
                        Error::validation(format!(
                            "region {} refers to unknown part {}",
                            region.seq, label
                        ))
                    })?
                    .push(region),
            }
        }

        Ok(Self { main, parts })
    }

    /// Total number of regions.
    pub fn region_count(&self) -> usize {
        let count = |b: &KindBuckets<'_>| b.text.len() + b.table.len() + b.diagram.len();
        count(&self.main) + self.parts.values().map(count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EncodedImage, Rect, Shape};
    use crate::parts::PartTree;
    use image::RgbaImage;

    fn region(seq: u32, kind: ContentKind, part: Option<&str>) -> Region {
        let crop = EncodedImage::from_rgba(&RgbaImage::new(1, 1)).unwrap();
        Region::new(seq, 0, Shape::Rect(Rect::new(0.0, 0.0, 1.0, 1.0)), crop)
            .with_kind(kind)
            .with_part(part.map(|p| p.parse().unwrap()))
    }

    #[test]
    fn test_partition() {
        let q = Question::new(1, 1, "")
            .with_parts(PartTree::from_strings(1, &["1.1", "1.2"]).unwrap());
        let regions = vec![
            region(1, ContentKind::Text, None),
            region(2, ContentKind::Table, Some("1.1")),
            region(3, ContentKind::Text, None),
            region(4, ContentKind::Text, Some("1.1")),
        ];
        let b = Buckets::partition(&q, &regions).unwrap();
        let main_seqs: Vec<u32> = b.main.text.iter().map(|r| r.seq).collect();
        assert_eq!(main_seqs, vec![1, 3]);
        let p11 = &b.parts[&"1.1".parse().unwrap()];
        assert_eq!(p11.table.len(), 1);
        assert_eq!(p11.text.len(), 1);
        assert!(b.parts[&"1.2".parse().unwrap()].is_empty());
        assert_eq!(b.region_count(), 4);
    }

    #[test]
    fn test_partition_unknown_part() {
        let q = Question::new(1, 1, "");
        let regions = vec![region(1, ContentKind::Text, Some("1.1"))];
        assert!(Buckets::partition(&q, &regions).is_err());
    }
}
