use std::io;
#[cfg(windows)]
use winapi::shared::minwindef::FALSE;
#[cfg(windows)]
use winapi::um::handleapi::CloseHandle;
#[cfg(windows)]
use winapi::um::processthreadsapi::{OpenProcess, TerminateProcess};
#[cfg(windows)]
use winapi::um::winnt::PROCESS_TERMINATE;
#[cfg(unix)]
use nix::sys::signal::{kill, Signal};
#[cfg(unix)]
use nix::unistd::Pid;

pub struct ProcessHelper;

impl ProcessHelper {
    /// Asks the process to terminate: SIGTERM on unix, TerminateProcess on windows.
    pub fn stop(pid: u32) -> io::Result<()> {
        #[cfg(unix)]
        {
            Self::signal(pid, Signal::SIGTERM)
        }
        #[cfg(windows)]
        {
            Self::terminate(pid)
        }
    }

    /// Forcefully kills the process. SIGKILL on unix.
    pub fn kill(pid: u32) -> io::Result<()> {
        #[cfg(unix)]
        {
            Self::signal(pid, Signal::SIGKILL)
        }
        #[cfg(windows)]
        {
            Self::terminate(pid)
        }
    }

    #[cfg(unix)]
    fn signal(pid: u32, signal: Signal) -> io::Result<()> {
        let pid = i32::try_from(pid)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "pid out of range"))?;
        kill(Pid::from_raw(pid), signal).map_err(io::Error::from)
    }

    #[cfg(windows)]
    fn terminate(pid: u32) -> io::Result<()> {
        let handle = unsafe { OpenProcess(PROCESS_TERMINATE, FALSE, pid) };
        if handle.is_null() {
            return Err(io::Error::last_os_error());
        }
        let result = unsafe { TerminateProcess(handle, 1) };
        unsafe { CloseHandle(handle) };
        if result == 0 {
            Err(io::Error::last_os_error())
        } else {
            Ok(())
        }
    }
}
