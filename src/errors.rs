use crate::spatial::TransformHandle;

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "{} is invalid.", _0)]
    InvalidHandle(TransformHandle),
    #[fail(display = "Node can not set self as parent.")]
    CanNotAttachSelfAsParent,
    #[fail(display = "Attaching {} to {} makes the hierarchy cyclic.", _0, _1)]
    CyclicHierarchy(TransformHandle, TransformHandle),
    #[fail(display = "Skeleton has {} joints but {} inverse bind matrices.", _0, _1)]
    JointCountMismatch(usize, usize),
    #[fail(display = "{}", _0)]
    Io(#[cause] ::std::io::Error),
    #[fail(display = "{}", _0)]
    Json(#[cause] serde_json::Error),
}

pub type Result<T> = ::std::result::Result<T, Error>;

impl From<::std::io::Error> for Error {
    fn from(err: ::std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}
