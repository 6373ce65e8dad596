use foundation::time::EpochMillis;

/// Metadata handed to every frame task.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FrameTick {
    /// 0-based frame index.
    pub index: u64,
    /// Wall-clock instant the frame started at.
    pub now: EpochMillis,
}

/// Returned by a frame task to keep running or retire itself.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TaskControl {
    Continue,
    Stop,
}

/// Owned handle to a registered frame task.
///
/// Cancelling through the handle is the external stop request; a task
/// can also retire itself by returning [`TaskControl::Stop`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

type FrameTask = Box<dyn FnMut(FrameTick) -> TaskControl>;

/// Repeating frame-task registry driven by the host once per display
/// frame.
///
/// Tasks run in registration order and each invocation completes
/// before the next task runs. The scheduler never reschedules itself;
/// the owner calls [`FrameScheduler::run_frame`] until it decides to
/// stop, which keeps frame-driven logic testable with a manual clock.
#[derive(Default)]
pub struct FrameScheduler {
    next_id: u64,
    frame_index: u64,
    tasks: Vec<(TaskHandle, FrameTask)>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, task: F) -> TaskHandle
    where
        F: FnMut(FrameTick) -> TaskControl + 'static,
    {
        let handle = TaskHandle(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.tasks.push((handle, Box::new(task)));
        handle
    }

    /// Cancels the task owned by `handle`.
    ///
    /// Returns `true` if the task was still registered.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|(h, _)| *h != handle);
        self.tasks.len() != before
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Runs every registered task once for the frame starting at `now`.
    pub fn run_frame(&mut self, now: EpochMillis) {
        let tick = FrameTick {
            index: self.frame_index,
            now,
        };
        self.frame_index += 1;

        let mut retired: Vec<TaskHandle> = Vec::new();
        for (handle, task) in &mut self.tasks {
            if task(tick) == TaskControl::Stop {
                retired.push(*handle);
            }
        }
        if !retired.is_empty() {
            self.tasks.retain(|(h, _)| !retired.contains(h));
        }
    }
}
