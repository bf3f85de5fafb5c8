//! Register-file I2C mock with an operation log.

use embedded_hal::i2c::{self, ErrorKind, ErrorType, I2c, Operation as I2cOp, SevenBitAddress};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

/// Records register traffic seen by the mock, one entry per byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
  Read { reg: u8, value: u8 },
  Write { reg: u8, value: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

impl i2c::Error for MockError {
  fn kind(&self) -> ErrorKind {
    ErrorKind::Other
  }
}

/// Device state a write hook may change.
pub struct Registers {
  pub values: [u8; 256],
  /// Values returned by successive reads of a register before falling back
  /// to `values`.
  pub scripted: HashMap<u8, VecDeque<u8>>,
  /// Registers that behave like a data port: reads pop, address does not
  /// advance.
  pub streams: HashMap<u8, VecDeque<u8>>,
}

impl Registers {
  pub fn script(&mut self, reg: u8, values: &[u8]) {
    self.scripted.entry(reg).or_default().extend(values.iter().copied());
  }

  fn read(&mut self, reg: u8) -> u8 {
    if let Some(v) = self.scripted.get_mut(&reg).and_then(|q| q.pop_front()) {
      return v;
    }
    self.values[reg as usize]
  }
}

type WriteHook = Box<dyn FnMut(&mut Registers, u8, u8)>;

struct MockState {
  address: SevenBitAddress,
  regs: Registers,
  operations: Vec<Operation>,
  fail_next: bool,
  hooks: Vec<WriteHook>,
}

/// Cloning shares the same device, so a test can keep a handle after the
/// driver takes ownership.
#[derive(Clone)]
pub struct MockI2c {
  state: Rc<RefCell<MockState>>,
}

impl MockI2c {
  pub fn new(address: SevenBitAddress) -> Self {
    Self {
      state: Rc::new(RefCell::new(MockState {
        address,
        regs: Registers { values: [0; 256], scripted: HashMap::new(), streams: HashMap::new() },
        operations: Vec::new(),
        fail_next: false,
        hooks: Vec::new(),
      })),
    }
  }

  pub fn set_register(&self, reg: u8, value: u8) {
    self.state.borrow_mut().regs.values[reg as usize] = value;
  }

  pub fn register(&self, reg: u8) -> u8 {
    self.state.borrow().regs.values[reg as usize]
  }

  pub fn script_reads(&self, reg: u8, values: &[u8]) {
    self.state.borrow_mut().regs.script(reg, values);
  }

  pub fn set_stream(&self, reg: u8, bytes: &[u8]) {
    self.state.borrow_mut().regs.streams.insert(reg, bytes.iter().copied().collect());
  }

  /// Called after every byte written, with the register and the value.
  pub fn on_write(&self, hook: impl FnMut(&mut Registers, u8, u8) + 'static) {
    self.state.borrow_mut().hooks.push(Box::new(hook));
  }

  pub fn fail_next(&self) {
    self.state.borrow_mut().fail_next = true;
  }

  pub fn operations(&self) -> Vec<Operation> {
    self.state.borrow().operations.clone()
  }

  pub fn clear_operations(&self) {
    self.state.borrow_mut().operations.clear();
  }

  pub fn writes(&self) -> Vec<(u8, u8)> {
    self
      .operations()
      .into_iter()
      .filter_map(|op| match op {
        Operation::Write { reg, value } => Some((reg, value)),
        _ => None,
      })
      .collect()
  }

  pub fn writes_to(&self, reg: u8) -> Vec<u8> {
    self.writes().into_iter().filter(|(r, _)| *r == reg).map(|(_, v)| v).collect()
  }

  pub fn reads_of(&self, reg: u8) -> usize {
    self.operations().iter().filter(|op| matches!(op, Operation::Read { reg: r, .. } if *r == reg)).count()
  }
}

impl ErrorType for MockI2c {
  type Error = MockError;
}

impl I2c for MockI2c {
  fn transaction(&mut self, address: SevenBitAddress, operations: &mut [I2cOp<'_>]) -> Result<(), MockError> {
    let mut guard = self.state.borrow_mut();
    let st = &mut *guard;
    if st.fail_next {
      st.fail_next = false;
      return Err(MockError);
    }
    if address != st.address {
      return Err(MockError);
    }

    let mut pointer = 0u8;
    for op in operations.iter_mut() {
      match op {
        I2cOp::Write(bytes) => {
          let Some((&reg, data)) = bytes.split_first() else { continue };
          pointer = reg;
          for &value in data {
            st.regs.values[pointer as usize] = value;
            st.operations.push(Operation::Write { reg: pointer, value });
            for hook in st.hooks.iter_mut() {
              hook(&mut st.regs, pointer, value);
            }
            pointer = pointer.wrapping_add(1);
          }
        }
        I2cOp::Read(buf) => {
          if let Some(stream) = st.regs.streams.get_mut(&pointer) {
            for b in buf.iter_mut() {
              *b = stream.pop_front().unwrap_or(0);
              st.operations.push(Operation::Read { reg: pointer, value: *b });
            }
            continue;
          }
          for b in buf.iter_mut() {
            *b = st.regs.read(pointer);
            st.operations.push(Operation::Read { reg: pointer, value: *b });
            pointer = pointer.wrapping_add(1);
          }
        }
      }
    }
    Ok(())
  }
}
