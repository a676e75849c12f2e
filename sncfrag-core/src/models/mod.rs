pub mod annotation;
pub mod fragment;
pub mod links;
pub mod read;
pub mod region;
pub mod region_list;

// re-export for cleaner imports
pub use self::annotation::{AnnotatedFragment, AnnotationIndex, Evidence};
pub use self::fragment::PredictedFragment;
pub use self::links::NameLinks;
pub use self::read::ReadInterval;
pub use self::region::Region;
pub use self::region_list::RegionList;
