mod complaint;

pub use complaint::{
    Complaint, ComplaintCategory, ComplaintLog, ComplaintStatus, ComplaintWithCreator,
};
