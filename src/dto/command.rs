use crate::dto::track::Track;

#[derive(Clone, Debug)]
pub(crate) enum Command {
    Enqueue(Track),
    Pause,
    Resume,
    Skip,
    SetVolume(u32),
    ClearQueue,
    ListQueue(usize),
    GetSnapshot,
    Leave,
}
