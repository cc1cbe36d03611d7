//! Database models and CRUD operations.

pub mod college;
pub mod course;
pub mod enquiry;
pub mod location;
pub mod object_id;

pub use college::{COLLEGE_CATEGORIES, College, CourseFee, FeePeriod};
pub use course::Course;
pub use enquiry::{CollegeApplication, CounsellingEnquiry, ENQUIRY_STATUSES, Enquiry};
pub use location::{City, Country, State};
pub use object_id::ObjectId;
