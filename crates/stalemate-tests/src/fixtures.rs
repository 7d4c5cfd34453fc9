//! Operation feeds shared by the end-to-end tests
//!
//! Each [`Scenario`] carries its CSV text and the verdict a full replay must
//! reach.

/// A named feed with its expected final verdict
#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    pub name: &'static str,
    pub csv: &'static str,
    pub deadlocked: bool,
}

impl Scenario {
    /// File name the scenario is written under
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.name)
    }
}

/// Two processes each holding what the other requests
pub const TWO_PROCESS_CYCLE: Scenario = Scenario {
    name: "two_process_cycle",
    csv: "process,action,resource
P1,hold,R1
P2,hold,R2
P1,request,R2
P2,request,R1
",
    deadlocked: true,
};

/// A wait that is satisfied by a release
pub const WAIT_THEN_RELEASE: Scenario = Scenario {
    name: "wait_then_release",
    csv: "process,action,resource
P1,hold,R1
P2,request,R1
P1,release,R1
P2,request,R1
",
    deadlocked: false,
};

/// Three-way cycle with a bystander waiting on it
pub const THREE_WAY_WITH_TAIL: Scenario = Scenario {
    name: "three_way_with_tail",
    csv: "process,action,resource
P1,hold,R1
P2,hold,R2
P3,hold,R3
P4,request,R1
P1,request,R2
P2,request,R3
P3,request,R1
",
    deadlocked: true,
};

/// A deadlock that a later release breaks
pub const RESOLVED_CYCLE: Scenario = Scenario {
    name: "resolved_cycle",
    csv: "process,action,resource
P1,hold,R1
P2,hold,R2
P1,request,R2
P2,request,R1
P2,release,R2
",
    deadlocked: false,
};

/// Messy but valid input: BOM, shuffled columns, blank lines, comments
pub const MESSY_FORMAT: Scenario = Scenario {
    name: "messy_format",
    csv: "\u{feff}Resource , Process,ACTION
R1,P1,hold

# comment row,#note,hold
R1,P2,Request
",
    deadlocked: false,
};

pub const ALL: [Scenario; 5] = [
    TWO_PROCESS_CYCLE,
    WAIT_THEN_RELEASE,
    THREE_WAY_WITH_TAIL,
    RESOLVED_CYCLE,
    MESSY_FORMAT,
];
