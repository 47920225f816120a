use alloy::sol;

sol! {
    contract Access {
        struct RoleData {
            address target;
            bytes4 selector;
            uint8 roleId;
        }

        struct TokenTransferability {
            uint256 tokenId;
            bool isNonTransferable;
        }

        event RoleAdded(bytes32 role, uint8 roleId);
        event RoleRenamed(bytes32 role, uint8 roleId);
        event RoleBound(uint256 funcId, uint8 roleId);
        event RoleUnbound(uint256 funcId, uint8 roleId);
        event RoleGranted(address user, uint8 roleId);
        event TokenTransferabilityChanged(uint256 tokenId, bool isNonTransferable);
        event Transfer(address indexed from, address indexed to, uint256 indexed tokenId);
        event Approval(address indexed owner, address indexed approved, uint256 indexed tokenId);
        event ApprovalForAll(address indexed owner, address indexed operator, bool approved);
        event OwnershipTransferred(address indexed previousOwner, address indexed newOwner);

        error OwnableUnauthorizedAccount(address account);
        error OwnableInvalidOwner(address owner);
        error TooBigRoleName();
        error MaxRolesReached();
        error RoleNotExists(uint8 roleId);
        error RoleAlreadyGranted();
        error NoChanges();
        error NotTokenOwner();
        error TokenNonTransferable();
        error NotInWhitelist();
        error AccessNotGranted();
        error ERC721NonexistentToken(uint256 tokenId);
        error ERC721InvalidReceiver(address receiver);
        error ERC721InvalidOperator(address operator);
        error ERC721IncorrectOwner(address sender, uint256 tokenId, address owner);

        function addRole(string memory role) external;
        function renameRole(uint8 roleId, string memory role) external;
        function roles(uint8 roleId) external view returns (bytes32);
        function bindRole(RoleData memory roleData) external;
        function bindRoles(RoleData[] memory roleDatas) external;
        function unbindRole(RoleData memory roleData) external;
        function getFunctionId(address target, bytes4 selector) external pure returns (uint256);
        function grantRole(address user, uint8 roleId) external;
        function grantRoleTransferable(address user, uint8 roleId, bool isNonTransferable) external;
        function burn(uint256 tokenId) external;
        function changeTokenTransferability(uint256 tokenId, bool isNonTransferable) external;
        function changeBatchTokenTransferability(TokenTransferability[] memory tokenTransferabilities) external;
        function addWhitelist(address[] memory addresses) external;
        function removeWhitelist(address[] memory addresses) external;
        function transferFrom(address from, address to, uint256 tokenId) external;
        function hasAccess(address caller, address target, bytes4 selector) external view returns (bool);
    }
}
