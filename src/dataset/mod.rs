/*!
 * Dataset preparation on top of the per-tick annotation table.
 *
 * - `frames`: Pivot of the long table into one record per tick
 * - `split`: Partition-wise train/validation/test split and target separation
 * - `multimodal`: Indexable (inputs, targets) dataset, batching and label encoding
 */

pub use self::frames::{build_frames, Record, TickFrame};
pub use self::multimodal::{LabelEncoder, MultimodalDataset};
pub use self::split::{DatasetSplit, Partitions, PreparedDataset};

pub mod frames;
pub mod multimodal;
pub mod split;
