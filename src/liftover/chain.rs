//! Reading UCSC chain files.
//!
//! A chain file is made of sections. Each section starts with a header line
//!
//! ```text
//! chain score tName tSize tStrand tStart tEnd qName qSize qStrand qStart qEnd id
//! ```
//!
//! followed by `size dt dq` alignment data lines and a final `size` line.
//! Sections are separated by blank lines.

use std::io::BufRead;
use std::io::{self};
use std::num::ParseIntError;
use std::str::FromStr;

use nonempty::NonEmpty;

/// The prefix for a header line.
pub const HEADER_PREFIX: &str = "chain";

/// The number of expected fields in a header line.
pub const NUM_HEADER_FIELDS: usize = 13;

/// The new line character.
const NEW_LINE: char = '\n';

/// The carriage return character.
const CARRIAGE_RETURN: char = '\r';

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error associated with parsing a chain file.
#[derive(Debug, Eq, PartialEq)]
pub enum ParseError {
    /// An incorrect number of fields in a header line.
    IncorrectNumberOfHeaderFields(usize),

    /// An incorrect number of fields in an alignment data line.
    IncorrectNumberOfDataFields(usize),

    /// An invalid header prefix.
    InvalidPrefix(String),

    /// A field that should hold a number does not.
    InvalidNumber(&'static str, ParseIntError),

    /// An invalid strand.
    InvalidStrand(String),

    /// The alignment end exceeds the size of the sequence.
    EndExceedsSize(String, u64, u64),

    /// The alignment data of a section does not add up to its header.
    Misaligned(u64),

    /// Alignment data appeared outside of a section.
    DataBetweenSections,

    /// A header appeared before the previous section was terminated.
    HeaderInSection,

    /// A blank line appeared within a section.
    BlankLineInSection,

    /// The file ended in the middle of a section.
    AbruptEndInSection,

    /// The alignment data of a section runs past the largest representable
    /// coordinate.
    CoordinateOverflow(u64),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::IncorrectNumberOfHeaderFields(n) => write!(
                f,
                "invalid number of fields in header: expected {NUM_HEADER_FIELDS} fields, found \
                 {n} fields"
            ),
            ParseError::IncorrectNumberOfDataFields(n) => write!(
                f,
                "invalid number of fields in alignment data: expected 3 (non-terminating) or 1 \
                 (terminating) fields, found {n} fields"
            ),
            ParseError::InvalidPrefix(prefix) => write!(
                f,
                "invalid prefix: expected \"{HEADER_PREFIX}\", found \"{prefix}\""
            ),
            ParseError::InvalidNumber(field, err) => write!(f, "invalid {field}: {err}"),
            ParseError::InvalidStrand(strand) => write!(f, "invalid strand: \"{strand}\""),
            ParseError::EndExceedsSize(name, end, size) => write!(
                f,
                "the end position ({end}) exceeds the size of the sequence `{name}` ({size})"
            ),
            ParseError::Misaligned(id) => write!(
                f,
                "alignment data of chain {id} does not add up to the header coordinates"
            ),
            ParseError::DataBetweenSections => {
                write!(f, "found alignment data between sections")
            }
            ParseError::HeaderInSection => write!(f, "found header in alignment section"),
            ParseError::BlankLineInSection => write!(f, "found blank line in alignment section"),
            ParseError::AbruptEndInSection => write!(
                f,
                "the file abruptly ended in the middle of an alignment section"
            ),
            ParseError::CoordinateOverflow(id) => {
                write!(f, "alignment data of chain {id} overflows the coordinate space")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// An error related to a [`Reader`].
#[derive(Debug)]
pub enum Error {
    /// An I/O error.
    Io(io::Error),

    /// A parse error on the given (1-based) line.
    Parse(usize, ParseError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::Parse(line, err) => write!(f, "parse error at line {line}: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// Parses a numeric field.
fn number(field: &'static str, value: &str) -> Result<u64, ParseError> {
    value
        .parse::<u64>()
        .map_err(|err| ParseError::InvalidNumber(field, err))
}

////////////////////////////////////////////////////////////////////////////////////////
// Header
////////////////////////////////////////////////////////////////////////////////////////

/// The strand of an aligned sequence.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Strand {
    /// The forward strand.
    Positive,

    /// The reverse strand. Coordinates count from the end of the sequence.
    Negative,
}

impl FromStr for Strand {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Positive),
            "-" => Ok(Strand::Negative),
            _ => Err(ParseError::InvalidStrand(s.to_string())),
        }
    }
}

/// One side (reference or query) of a chain header.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Sequence {
    /// The sequence name.
    name: String,

    /// The full size of the sequence.
    size: u64,

    /// The strand the alignment coordinates are expressed on.
    strand: Strand,

    /// The alignment start (0-based).
    start: u64,

    /// The alignment end (exclusive).
    end: u64,
}

impl Sequence {
    /// Parses the five fields describing a sequence.
    fn parse(fields: &[&str]) -> Result<Self, ParseError> {
        let name = fields[0].to_string();
        let size = number("size", fields[1])?;
        let strand = fields[2].parse()?;
        let start = number("start", fields[3])?;
        let end = number("end", fields[4])?;

        if end > size {
            return Err(ParseError::EndExceedsSize(name, end, size));
        }

        Ok(Self {
            name,
            size,
            strand,
            start,
            end,
        })
    }

    /// Gets the sequence name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the sequence size.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Gets the strand.
    pub fn strand(&self) -> Strand {
        self.strand
    }

    /// Gets the alignment start.
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Gets the alignment end.
    pub fn end(&self) -> u64 {
        self.end
    }
}

/// A chain header line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Header {
    /// The chain score.
    score: u64,

    /// The reference (from) sequence.
    reference: Sequence,

    /// The query (to) sequence.
    query: Sequence,

    /// The chain id.
    id: u64,
}

impl Header {
    /// Gets the score.
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Gets the reference sequence.
    pub fn reference(&self) -> &Sequence {
        &self.reference
    }

    /// Gets the query sequence.
    pub fn query(&self) -> &Sequence {
        &self.query
    }

    /// Gets the chain id.
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl FromStr for Header {
    type Err = ParseError;

    /// Parses a header line.
    ///
    /// # Examples
    ///
    /// ```
    /// use omiclift::liftover::chain::Header;
    /// use omiclift::liftover::chain::Strand;
    ///
    /// let header = "chain 0 seq0 4 + 0 4 seq1 5 - 0 5 1".parse::<Header>()?;
    ///
    /// assert_eq!(header.reference().name(), "seq0");
    /// assert_eq!(header.query().size(), 5);
    /// assert_eq!(header.query().strand(), Strand::Negative);
    /// assert_eq!(header.id(), 1);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = s.split_whitespace().collect::<Vec<_>>();

        if fields.len() != NUM_HEADER_FIELDS {
            return Err(ParseError::IncorrectNumberOfHeaderFields(fields.len()));
        }

        if fields[0] != HEADER_PREFIX {
            return Err(ParseError::InvalidPrefix(fields[0].to_string()));
        }

        Ok(Self {
            score: number("score", fields[1])?,
            reference: Sequence::parse(&fields[2..7])?,
            query: Sequence::parse(&fields[7..12])?,
            id: number("id", fields[12])?,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////
// Alignment data
////////////////////////////////////////////////////////////////////////////////////////

/// An alignment data line: an ungapped block and the gaps that follow it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Block {
    /// The size of the ungapped block.
    size: u64,

    /// The gap to the next block on the reference and query, absent on the
    /// terminating line.
    gaps: Option<(u64, u64)>,
}

impl Block {
    /// Gets the block size.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Gets the reference and query gaps following the block.
    pub fn gaps(&self) -> Option<(u64, u64)> {
        self.gaps
    }

    /// Whether this is the last block of a section.
    pub fn is_terminating(&self) -> bool {
        self.gaps.is_none()
    }
}

impl FromStr for Block {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = s.split_whitespace().collect::<Vec<_>>();

        match fields.as_slice() {
            [size] => Ok(Self {
                size: number("size", size)?,
                gaps: None,
            }),
            [size, dt, dq] => Ok(Self {
                size: number("size", size)?,
                gaps: Some((number("dt", dt)?, number("dq", dq)?)),
            }),
            _ => Err(ParseError::IncorrectNumberOfDataFields(fields.len())),
        }
    }
}

/// An aligned, ungapped segment shared by the reference and the query.
///
/// Query coordinates are expressed on the query strand named in the header.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Segment {
    /// The 0-based start on the reference.
    pub reference_start: u64,

    /// The 0-based start on the query strand.
    pub query_start: u64,

    /// The number of aligned bases.
    pub size: u64,
}

////////////////////////////////////////////////////////////////////////////////////////
// Chains
////////////////////////////////////////////////////////////////////////////////////////

/// A full chain section.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Chain {
    /// The header.
    header: Header,

    /// The alignment data. The last block is always terminating.
    blocks: NonEmpty<Block>,
}

impl Chain {
    /// Creates a chain, checking that the blocks add up to the header.
    fn try_new(header: Header, blocks: NonEmpty<Block>) -> Result<Self, ParseError> {
        let id = header.id;
        let overflow = || ParseError::CoordinateOverflow(id);

        let mut reference = header.reference.start;
        let mut query = header.query.start;

        for block in blocks.iter() {
            let (dt, dq) = block.gaps.unwrap_or((0, 0));

            reference = reference
                .checked_add(block.size)
                .and_then(|n| n.checked_add(dt))
                .ok_or_else(overflow)?;
            query = query
                .checked_add(block.size)
                .and_then(|n| n.checked_add(dq))
                .ok_or_else(overflow)?;
        }

        if reference != header.reference.end || query != header.query.end {
            return Err(ParseError::Misaligned(id));
        }

        Ok(Self { header, blocks })
    }

    /// Gets the header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Gets the alignment data.
    pub fn blocks(&self) -> &NonEmpty<Block> {
        &self.blocks
    }

    /// Iterates over the aligned segments of the chain.
    ///
    /// # Examples
    ///
    /// ```
    /// use omiclift::liftover::chain::Reader;
    /// use omiclift::liftover::chain::Segment;
    ///
    /// let data = b"chain 0 seq0 10 + 0 10 seq1 12 + 0 12 1\n4\t1\t3\n5\n";
    /// let mut reader = Reader::new(&data[..]);
    /// let chain = reader.chains().next().unwrap()?;
    ///
    /// let segments = chain.segments().collect::<Vec<_>>();
    /// assert_eq!(segments[1], Segment { reference_start: 5, query_start: 7, size: 5 });
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        let mut reference = self.header.reference.start;
        let mut query = self.header.query.start;

        self.blocks.iter().map(move |block| {
            let segment = Segment {
                reference_start: reference,
                query_start: query,
                size: block.size,
            };

            let (dt, dq) = block.gaps.unwrap_or((0, 0));
            reference += block.size + dt;
            query += block.size + dq;

            segment
        })
    }
}

/// A chain file reader.
#[derive(Clone, Debug)]
pub struct Reader<T>
where
    T: BufRead,
{
    /// The inner reader.
    inner: T,

    /// The number of lines read so far.
    line_no: usize,
}

impl<T> Reader<T>
where
    T: BufRead,
{
    /// Creates a chain file reader.
    pub fn new(inner: T) -> Self {
        Self { inner, line_no: 0 }
    }

    /// Returns an iterator over the chain sections.
    pub fn chains(&mut self) -> Chains<'_, T> {
        Chains {
            reader: self,
            buffer: String::new(),
        }
    }

    /// Reads a single line without its line terminator.
    fn read_line(&mut self, buffer: &mut String) -> io::Result<usize> {
        buffer.clear();

        let n = self.inner.read_line(buffer)?;

        if n > 0 {
            self.line_no += 1;

            if buffer.ends_with(NEW_LINE) {
                buffer.pop();

                if buffer.ends_with(CARRIAGE_RETURN) {
                    buffer.pop();
                }
            }
        }

        Ok(n)
    }
}

/// An iterator over the chains of a [`Reader`].
#[derive(Debug)]
pub struct Chains<'a, T>
where
    T: BufRead,
{
    /// The reader.
    reader: &'a mut Reader<T>,

    /// The line buffer.
    buffer: String,
}

impl<T> Chains<'_, T>
where
    T: BufRead,
{
    /// Reads the next full section.
    fn read_chain(&mut self) -> Result<Option<Chain>, Error> {
        let mut section: Option<(Header, Vec<Block>)> = None;

        loop {
            let read = self
                .reader
                .read_line(&mut self.buffer)
                .map_err(Error::Io)?;
            let line_no = self.reader.line_no;
            let parse = move |err| Error::Parse(line_no, err);

            if read == 0 {
                return match section {
                    Some(_) => Err(parse(ParseError::AbruptEndInSection)),
                    None => Ok(None),
                };
            }

            let line = self.buffer.trim();

            if line.starts_with('#') {
                continue;
            }

            if line.is_empty() {
                match section {
                    Some(_) => return Err(parse(ParseError::BlankLineInSection)),
                    None => continue,
                }
            }

            if line.starts_with(HEADER_PREFIX) {
                if section.is_some() {
                    return Err(parse(ParseError::HeaderInSection));
                }

                let header = line.parse::<Header>().map_err(parse)?;
                section = Some((header, Vec::new()));
                continue;
            }

            let block = line.parse::<Block>().map_err(parse)?;

            let (header, mut blocks) = match section.take() {
                Some(section) => section,
                None => return Err(parse(ParseError::DataBetweenSections)),
            };

            blocks.push(block);

            if !block.is_terminating() {
                section = Some((header, blocks));
                continue;
            }

            let blocks = NonEmpty::from_vec(blocks)
                .unwrap_or_else(|| unreachable!("a terminating block was just pushed"));

            return Chain::try_new(header, blocks).map(Some).map_err(parse);
        }
    }
}

impl<T> Iterator for Chains<'_, T>
where
    T: BufRead,
{
    type Item = Result<Chain, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_chain().transpose()
    }
}
