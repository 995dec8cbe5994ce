use std::{hash::{Hash, Hasher}, ops::Index};
use bitfield_struct::bitfield;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::errors::GridError;

#[bitfield(u8, new=false)]
#[derive(Serialize, Deserialize, PartialEq, Eq)]
pub struct GridPointFlags
{
    pub is_leaf: bool,
    pub is_inner: bool,
    #[bits(6)]
    pub _empty: u8
}

impl GridPointFlags
{
    pub fn new(level: &[u32], is_leaf: bool) -> Self
    {
        let mut r = Self::default();
        r.set_is_leaf(is_leaf);
        r.set_is_inner(!level.contains(&0));
        r
    }
    /// update `is_inner` flag...
    pub fn update_is_inner(&mut self, level: &[u32])
    {
        self.set_is_inner(!level.contains(&0));
    }
}

///
/// One grid point of a hierarchical dyadic grid: a (level, index) pair per
/// dimension. The node coordinate along dimension `d` is
/// `index[d] / 2^level[d]`.
///
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct GridPoint
{
    pub level: Vec<u32>,
    pub index: Vec<u32>,
    pub(crate) flags: GridPointFlags,
}
impl Hash for GridPoint
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.level.hash(state);
        self.index.hash(state);
    }
}
impl Default for GridPoint
{
    fn default() -> Self {
        Self { level: vec![], index: vec![], flags: GridPointFlags(0) }
    }
}
impl PartialOrd for GridPoint
{
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(std::cmp::Ord::cmp(self, other))
    }
}
impl Ord for GridPoint{
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.index.cmp(&other.index).then(self.level.cmp(&other.level))
    }
}

impl PartialEq for GridPoint
{
    fn eq(&self, other: &Self) -> bool {
        self.level == other.level && self.index == other.index
    }
}
impl Eq for GridPoint{}

impl GridPoint
{
    pub fn new(level: &[u32], index: &[u32], is_leaf: bool) -> Self
    {
        let flags = GridPointFlags::new(level, is_leaf);
        Self { level: level.to_vec(), index: index.to_vec(), flags }
    }
    #[inline]
    pub fn num_dimensions(&self) -> usize
    {
        self.level.len()
    }
    pub fn is_leaf(&self) -> bool
    {
        self.flags.is_leaf()
    }
    pub fn set_is_leaf(&mut self, is_leaf: bool)
    {
        self.flags.set_is_leaf(is_leaf);
    }
    ///
    /// This is an inner point if no levels are zero...
    ///
    pub fn is_inner_point(&self) -> bool
    {
        self.flags.is_inner()
    }
    pub fn level_sum(&self) -> u32
    {
        self.level.iter().sum()
    }
    #[inline]
    pub fn level_max(&self) -> u32
    {
        *self.level.iter().max().unwrap_or(&0)
    }
    pub fn level_min(&self) -> u32
    {
        *self.level.iter().min().unwrap_or(&0)
    }

    pub fn left_child(&self, dim: usize) -> GridPoint
    {
        let mut r = self.clone();
        if r.index[dim] == 0
        {
            r.index[dim] = u32::MAX;
            return r;
        }
        r.index[dim] = 2*self.index[dim] - 1;
        r.level[dim] += 1;
        r
    }
    pub fn right_child(&self, dim: usize) -> GridPoint
    {
        let mut r = self.clone();
        r.index[dim] = 2*self.index[dim] + 1;
        r.level[dim] += 1;
        r
    }
    ///
    /// returns a point with the top level in direction dim
    ///
    pub fn root(&self, dim: usize) -> GridPoint
    {
        let mut r = self.clone();
        r.index[dim] = 1;
        r.level[dim] = 1;
        r
    }

    ///
    /// This only works for grids without boundaries.
    ///
    pub fn parent(&self, dim: usize) -> GridPoint
    {
        let mut r = self.clone();
        if self.level[dim] == 0
        {
            r.index[dim] = u32::MAX;
            return r;
        }
        r.index[dim] = (self.index[dim] >> 1) | 1;
        r.level[dim] -= 1;
        r
    }

    pub fn unit_coordinate(&self) -> Vec<f64>
    {
        let mut coor = vec![0.0; self.num_dimensions()];
        #[allow(clippy::needless_range_loop)]
        for d in 0..coor.len()
        {
            coor[d] = self.index[d] as f64 / (1_u64 << self.level[d]) as f64;
        }
        coor
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct BoundingBox
{
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

impl BoundingBox
{
    #[inline]
    pub fn new(lower: &[f64], upper: &[f64]) -> Self
    {
        Self { lower: lower.to_vec(), upper: upper.to_vec() }
    }
    #[inline]
    pub fn width(&self, dim: usize) -> f64
    {
        self.upper[dim] - self.lower[dim]
    }

    ///
    /// Volume of hypercube (width(dim1)*...*width(dim_n))
    ///
    #[inline]
    pub fn volume(&self) -> f64
    {
        let mut volume = 1.0;
        for d in 0..self.lower.len()
        {
            volume *= self.width(d);
        }
        volume
    }
    #[inline]
    pub fn to_unit_coordinate(&self, point: &[f64]) -> Vec<f64>
    {
        let mut r = vec![0.0; point.len()];
        for i in 0..point.len()
        {
            r[i] = (point[i] - self.lower[i])/(self.upper[i] - self.lower[i]);
        }
        r
    }
    #[inline]
    pub fn to_real_coordinate(&self, point: &[f64]) -> Vec<f64>
    {
        let mut r = vec![0.0; point.len()];
        for i in 0..point.len()
        {
            r[i] = self.lower[i] + (self.upper[i] - self.lower[i]) * point[i];
        }
        r
    }
    #[inline]
    pub fn contains(&self, point: &[f64]) -> bool
    {
        #[allow(clippy::needless_range_loop)]
        for d in 0..point.len()
        {
            if self.lower[d] > point[d] || self.upper[d] < point[d]
            {
                return false;
            }
        }
        true
    }
}

///
/// The serializable payload of `GridStorage`: the point list in insertion
/// order plus the optional bounding box. The point -> sequence map is
/// rebuilt on load so the byte stream stays independent of hash ordering.
///
#[derive(Clone, Serialize, Deserialize)]
pub struct GridData
{
    pub(crate) list: Vec<GridPoint>,
    pub(crate) bounding_box: Option<BoundingBox>,
    pub(crate) num_dimensions: usize,
}

impl GridData
{
    pub fn new(num_dimensions: usize) -> Self
    {
        Self { list: Vec::new(), bounding_box: None, num_dimensions }
    }
    pub fn is_empty(&self) -> bool
    {
        self.list.is_empty()
    }
    pub fn len(&self) -> usize
    {
        self.list.len()
    }
    pub fn iter(&self) -> std::slice::Iter<'_, GridPoint>
    {
        self.list.iter()
    }
}

///
/// Insertion ordered storage of grid points. Each point receives a stable
/// sequence index at insertion, and a map allows retrieval of the sequence
/// index for a given grid point.
///
#[derive(Clone)]
pub struct GridStorage
{
    pub map: FxHashMap<GridPoint, usize>,
    pub data: GridData,
}

impl GridStorage
{
    pub fn new(num_dimensions: usize) -> Self
    {
        Self { map: FxHashMap::default(), data: GridData::new(num_dimensions) }
    }
    pub fn from_data(data: GridData) -> Self
    {
        let map: FxHashMap<GridPoint, usize> = FxHashMap::from_iter(data.iter().enumerate().map(|(i, item)|(item.clone(), i)));
        Self { data, map }
    }
    #[inline(always)]
    pub fn len(&self) -> usize
    {
        self.data.list.len()
    }
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    #[inline(always)]
    pub fn num_dimensions(&self) -> usize
    {
        self.data.num_dimensions
    }
    #[inline]
    pub fn contains(&self, point: &GridPoint) -> bool
    {
        self.map.contains_key(point)
    }
    #[inline(always)]
    pub fn list(&self) -> &Vec<GridPoint>
    {
        &self.data.list
    }
    #[inline]
    pub fn bounding_box(&self) -> Option<&BoundingBox>
    {
        self.data.bounding_box.as_ref()
    }
    #[inline]
    pub fn bounding_box_mut(&mut self) -> &mut Option<BoundingBox>
    {
        &mut self.data.bounding_box
    }
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, GridPoint>
    {
        self.data.list.iter()
    }
    #[inline]
    pub fn sequence_number(&self, point: &GridPoint) -> Option<usize>
    {
        self.map.get(point).copied()
    }

    ///
    /// Inserts a point, returning its sequence index. The point must have
    /// the same dimensionality as the storage.
    ///
    pub fn insert_point(&mut self, point: GridPoint) -> usize
    {
        debug_assert_eq!(point.num_dimensions(), self.data.num_dimensions);
        let value = self.data.list.len();
        self.map.insert(point.clone(), value);
        self.data.list.push(point);
        value
    }

    pub fn points(&self) -> Vec<Vec<f64>>
    {
        let mut list = Vec::new();
        for index in &self.data.list
        {
            let mut point = index.unit_coordinate();
            if let Some(bbox) = &self.data.bounding_box
            {
                point = bbox.to_real_coordinate(&point);
            }
            list.push(point)
        }
        list
    }

    pub fn write_buffer(&self) -> Result<Vec<u8>, GridError>
    {
        let bytes = bincode::serde::encode_to_vec(&self.data, bincode::config::standard()).map_err(|_|GridError::SerializationFailed)?;
        Ok(lz4_flex::compress_prepend_size(&bytes))
    }

    pub fn read_buffer(buffer: &[u8]) -> Result<Self, GridError>
    {
        let bytes = lz4_flex::decompress_size_prepended(buffer).map_err(|_|GridError::LZ4DecompressionFailed)?;
        let (data, _): (GridData, usize) = bincode::serde::decode_from_slice(&bytes, bincode::config::standard()).map_err(|_|GridError::DeserializationFailed)?;
        Ok(Self::from_data(data))
    }

    pub fn write<Writer: std::io::Write>(&self, mut writer: Writer) -> Result<(), GridError>
    {
        let buffer = self.write_buffer()?;
        writer.write_all(&buffer).map_err(|_|GridError::WriteBufferFailed)
    }

    pub fn read<Reader: std::io::Read>(mut reader: Reader) -> Result<Self, GridError>
    {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).map_err(|_|GridError::ReadBufferFailed)?;
        Self::read_buffer(&bytes)
    }
}

impl<Idx: std::slice::SliceIndex<[GridPoint]>> Index<Idx> for GridStorage
{
    type Output = Idx::Output;
    fn index(&self, index: Idx) -> &Self::Output
    {
        &self.data.list[index]
    }
}

#[test]
fn check_insertion_order()
{
    let mut storage = GridStorage::new(2);
    let a = GridPoint::new(&[1, 1], &[1, 1], false);
    let b = GridPoint::new(&[2, 1], &[1, 1], true);
    let c = GridPoint::new(&[2, 1], &[3, 1], true);
    assert_eq!(storage.insert_point(a.clone()), 0);
    assert_eq!(storage.insert_point(b.clone()), 1);
    assert_eq!(storage.insert_point(c.clone()), 2);
    assert_eq!(storage.len(), 3);
    assert_eq!(storage.sequence_number(&b), Some(1));
    assert!(storage.contains(&c));
    assert_eq!(storage.sequence_number(&GridPoint::new(&[3, 1], &[1, 1], false)), None);
    let levels: Vec<u32> = storage.iter().map(|p|p.level[0]).collect();
    assert_eq!(levels, vec![1, 2, 2]);
    assert_eq!(storage[0], a);
}

#[test]
fn check_point_navigation()
{
    let point = GridPoint::new(&[3], &[3], false);
    let parent = point.parent(0);
    assert_eq!(parent, GridPoint::new(&[2], &[1], false));
    assert_eq!(parent.parent(0), GridPoint::new(&[1], &[1], false));
    assert_eq!(parent.left_child(0), GridPoint::new(&[3], &[1], false));
    assert_eq!(parent.right_child(0), point);
    assert_eq!(point.root(0), GridPoint::new(&[1], &[1], false));
    assert_eq!(point.level_sum(), 3);
    assert_eq!(point.level_max(), 3);
}

#[test]
fn check_unit_coordinates()
{
    let point = GridPoint::new(&[2, 3], &[3, 1], false);
    assert_eq!(point.unit_coordinate(), vec![0.75, 0.125]);
    assert!(point.is_inner_point());
    let mut boundary = GridPoint::new(&[0, 3], &[0, 1], false);
    assert!(!boundary.is_inner_point());
    boundary.level = vec![1, 3];
    boundary.flags.update_is_inner(&boundary.level);
    assert!(boundary.is_inner_point());
}

#[test]
fn check_bounding_box()
{
    let bbox = BoundingBox::new(&[0.0, -1.0], &[2.0, 1.0]);
    assert_eq!(bbox.width(0), 2.0);
    assert_eq!(bbox.volume(), 4.0);
    assert!(bbox.contains(&[1.0, 0.0]));
    assert!(!bbox.contains(&[3.0, 0.0]));
    assert_eq!(bbox.to_unit_coordinate(&[1.0, 0.0]), vec![0.5, 0.5]);
    assert_eq!(bbox.to_real_coordinate(&[0.5, 0.5]), vec![1.0, 0.0]);
}

#[test]
fn check_storage_roundtrip()
{
    let mut storage = GridStorage::new(3);
    for (level, index) in [([1, 1, 1], [1, 1, 1]), ([2, 1, 1], [1, 1, 1]), ([2, 1, 1], [3, 1, 1]), ([1, 2, 1], [1, 3, 1])]
    {
        storage.insert_point(GridPoint::new(&level, &index, false));
    }
    *storage.bounding_box_mut() = Some(BoundingBox::new(&[0.0; 3], &[2.0; 3]));
    let buffer = storage.write_buffer().unwrap();
    let restored = GridStorage::read_buffer(&buffer).unwrap();
    assert_eq!(restored.len(), storage.len());
    assert_eq!(restored.num_dimensions(), 3);
    assert_eq!(restored.points(), storage.points());
    assert_eq!(restored.sequence_number(&storage[2]), Some(2));
    // a second pass over the wire must reproduce the identical byte stream
    assert_eq!(restored.write_buffer().unwrap(), buffer);
}

#[test]
fn check_storage_io()
{
    let mut storage = GridStorage::new(1);
    storage.insert_point(GridPoint::new(&[1], &[1], true));
    let mut buffer = Vec::new();
    storage.write(&mut buffer).unwrap();
    let restored = GridStorage::read(buffer.as_slice()).unwrap();
    assert_eq!(restored.len(), 1);
    assert!(GridStorage::read_buffer(&buffer[..buffer.len()/2]).is_err());
}
